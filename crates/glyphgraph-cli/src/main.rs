use std::io::Read;

use glyphgraph::{AsciiOptions, GraphDirection, RenderOptions};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Glyphgraph(glyphgraph::Error),
    UnknownTheme(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Glyphgraph(err) => write!(f, "{err}"),
            CliError::UnknownTheme(key) => write!(f, "unknown theme '{key}'"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<glyphgraph::Error> for CliError {
    fn from(value: glyphgraph::Error) -> Self {
        Self::Glyphgraph(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Ascii,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    theme: Option<String>,
    ascii_mode: bool,
    graph_direction: Option<GraphDirection>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "glyphgraph\n\
\n\
USAGE:\n\
  glyphgraph render [--theme <name>] [--ascii] [--out <path>] [<path>|-]\n\
  glyphgraph ascii [--ascii] [--direction lr|td] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - render prints an SVG document to stdout by default; use --out to write a file.\n\
  - ascii prints a plain-text diagram; --ascii selects the ASCII glyph set\n\
    instead of the Unicode box-drawing default.\n\
  - --theme selects a named palette (tokyo-night, dracula, github-light,\n\
    solarized-dark, nord, one-light) for the render command.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "ascii" => args.command = Command::Ascii,
            "--ascii" => args.ascii_mode = true,
            "--theme" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.theme = Some(name.clone());
            }
            "--direction" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.graph_direction = Some(match dir.to_ascii_lowercase().as_str() {
                    "lr" => GraphDirection::Lr,
                    "td" => GraphDirection::Td,
                    _ => return Err(CliError::Usage(usage())),
                });
            }
            "--out" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(path.clone());
            }
            other if args.input.is_none() => args.input = Some(other.to_string()),
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn render_options(args: &Args) -> Result<RenderOptions, CliError> {
    match &args.theme {
        None => Ok(RenderOptions::default()),
        Some(key) => glyphgraph::render_options_for_theme(key).ok_or_else(|| CliError::UnknownTheme(key.clone())),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let source = read_input(args.input.as_deref())?;

    match args.command {
        Command::Render => {
            let opts = render_options(&args)?;
            let svg = glyphgraph::render(&source, &opts)?;
            write_text(&svg, args.out.as_deref())?;
        }
        Command::Ascii => {
            let mut opts = AsciiOptions { use_ascii: args.ascii_mode, ..AsciiOptions::default() };
            if let Some(direction) = args.graph_direction {
                opts.graph_direction = direction;
            }
            let text = glyphgraph::render_ascii(&source, &opts)?;
            write_text(&text, args.out.as_deref())?;
        }
    }

    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
