//! scopetint - resolve and preview scope-based editor themes

use std::env;
use std::io::{self, BufRead};
use std::path::Path;
use std::process;

use unicode_width::UnicodeWidthStr;

use scopetint::config::Config;
use scopetint::error::{Result, ThemeError};
use scopetint::logging;
use scopetint::render::Renderer;
use scopetint::theme::{Highlighter, Theme, ThemeManager, Token};

fn main() {
    logging::init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let config = Config::load();

    // --theme overrides the config file
    let mut theme_arg = config.theme.clone();
    if let Some(pos) = args.iter().position(|a| a == "--theme" || a == "-t") {
        args.remove(pos);
        if pos >= args.len() {
            return Err(ThemeError::Message("--theme needs a file or theme name".into()));
        }
        theme_arg = Some(args.remove(pos));
    }

    let mut manager = ThemeManager::new();

    match args.first().map(String::as_str) {
        None | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("--version") | Some("-V") => {
            print_version();
            Ok(())
        }
        Some("list") => {
            list_themes(&manager);
            Ok(())
        }
        Some("check") => match args.get(1) {
            Some(path) => check(Path::new(path)),
            None => Err(ThemeError::Message("check needs a theme file".into())),
        },
        Some("resolve") => {
            let theme = select_theme(&mut manager, theme_arg.as_deref())?;
            print_resolved(theme, &args[1..], config.show_scopes);
            Ok(())
        }
        Some("paint") => {
            let theme = select_theme(&mut manager, theme_arg.as_deref())?;
            paint(theme, Renderer::new(config.color_mode).with_background())
        }
        Some(other) => Err(ThemeError::Message(format!("unknown command: {other}"))),
    }
}

/// Pick the theme named on the command line or in the config
fn select_theme<'a>(manager: &'a mut ThemeManager, theme_arg: Option<&str>) -> Result<&'a Theme> {
    match theme_arg {
        Some(arg) => manager.select(arg),
        None => manager
            .active()
            .ok_or_else(|| ThemeError::Message("no themes available".into())),
    }
}

fn check(path: &Path) -> Result<()> {
    let theme = Theme::load(path)?;
    println!(
        "ok: {} ({}, {} rules, {} editor colors)",
        theme.name,
        theme.kind,
        theme.rules.len(),
        theme.colors.len()
    );
    Ok(())
}

fn print_resolved(theme: &Theme, scopes: &[String], show_rule: bool) {
    let style = theme.resolve(scopes);
    let font_style = if style.font_style.is_empty() {
        "-".to_string()
    } else {
        style.font_style.to_string()
    };

    println!("foreground  {}", style.foreground);
    println!("background  {}", style.background);
    println!("fontStyle   {}", font_style);

    if show_rule {
        match theme.winning_rule(scopes) {
            Some(found) => println!(
                "rule        #{} {} (scope {:?}, specificity {})",
                found.index,
                found.rule.label(),
                scopes[found.scope_index],
                found.specificity
            ),
            None => println!("rule        (theme default)"),
        }
    }
}

/// Paint `text<TAB>scopes` lines from stdin; a blank line ends an output line
fn paint(theme: &Theme, renderer: Renderer) -> Result<()> {
    let highlighter = Highlighter::new(theme);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut tokens: Vec<Token> = Vec::new();

    let mut flush = |tokens: &mut Vec<Token>| -> Result<()> {
        let text = Highlighter::line_text(tokens);
        let spans = highlighter.highlight_tokens(tokens);
        renderer.write_line(&mut stdout, &text, &spans)?;
        tokens.clear();
        Ok(())
    };

    for line in stdin.lock().lines() {
        let line = line?;
        if line.is_empty() {
            flush(&mut tokens)?;
        } else {
            tokens.push(Token::parse_line(&line));
        }
    }
    if !tokens.is_empty() {
        flush(&mut tokens)?;
    }
    Ok(())
}

fn list_themes(manager: &ThemeManager) {
    let names = manager.list_themes();
    let width = names.iter().map(|n| n.width()).max().unwrap_or(0);
    let active = manager.active().map(|t| t.name.as_str());

    for name in names {
        let Some(theme) = manager.get(name) else {
            continue;
        };
        let marker = if Some(name) == active { '*' } else { ' ' };
        let pad = " ".repeat(width - name.width());
        println!("{} {}{}  {:<7} {} rules", marker, name, pad, theme.kind.name(), theme.rules.len());
    }
}

fn print_usage() {
    println!("scopetint {} - scope-based editor theme resolution", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: scopetint [--theme FILE|NAME] COMMAND");
    println!();
    println!("Commands:");
    println!("  resolve SCOPE...   Print the style for one token (scopes innermost first)");
    println!("  check FILE         Validate a .json or .toml theme document");
    println!("  paint              Paint stdin lines of the form TEXT<TAB>SCOPES");
    println!("  list               List bundled themes");
    println!();
    println!("Options:");
    println!("  -t, --theme        Theme file or bundled theme name");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    println!("Settings are read from ~/.scopetint.conf; RUST_LOG controls logging.");
}

fn print_version() {
    println!("scopetint {}", env!("CARGO_PKG_VERSION"));
}
