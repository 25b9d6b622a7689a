use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use jcheck::report::{self, Format, Report};
use jcheck::{Config, Error, Result, Session};
use jcheck_config::CONFIG_FILE_NAME;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless JCHECK_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Checks a source file, or standard input when the path is `-`
    Check {
        path: PathBuf,
        /// Only run the lexer and the syntax validators
        #[arg(long)]
        syntax_only: bool,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Directory holding the jcheck.toml to use, which must exist and be valid
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },
    /// Lists the String method names, or tells whether NAME is one of them
    Methods { name: Option<String> },
    /// Creates a jcheck.toml on the current working directory or on the specified path
    Init {
        /// The path to create the jcheck.toml file in.
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    jcheck::logging::init_tracing(cli.verbose).ok();

    let result = match cli.command {
        Commands::Check {
            path,
            syntax_only,
            format,
            config_dir,
        } => check(&path, syntax_only, format, config_dir.as_deref()),
        Commands::Methods { name } => Ok(methods(name.as_deref())),
        Commands::Init { path } => init(path.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(%error, "jcheck failed");
            eprintln!("error: {error}");
            ExitCode::from(2)
        }
    }
}

fn check(path: &Path, syntax_only: bool, format: Format, config_dir: Option<&Path>) -> Result<ExitCode> {
    let config = match config_dir {
        Some(dir) => Config::from_dir(dir)?,
        None => jcheck_config::load_config(std::env::current_dir().ok()),
    };
    tracing::debug!(?config, "configuration loaded");

    let source = read_source(path)?;
    let mut session = Session::new(config);

    let (rendered, clean) = if syntax_only {
        let syntax = session.check_syntax_only(&source)?;
        (report::render(&syntax, format)?, syntax.is_clean())
    } else {
        let analysis = session.analyze(&source)?;
        (report::render(&analysis, format)?, analysis.is_clean())
    };

    print!("{rendered}");
    if format == Format::Json {
        println!();
    }

    Ok(if clean { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(|source| Error::Io {
                path: PathBuf::from("<stdin>"),
                source,
            })?;
        return Ok(source);
    }

    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn methods(name: Option<&str>) -> ExitCode {
    let registry = jcheck::string_methods();

    match name {
        Some(name) if registry.contains(name) => {
            println!("'{name}' is a String method");
            ExitCode::SUCCESS
        }
        Some(name) => {
            println!("'{name}' is not a String method");
            ExitCode::FAILURE
        }
        None => {
            registry.methods().iter().for_each(|method| println!("{method}"));
            ExitCode::SUCCESS
        }
    }
}

fn init(path: Option<&Path>) -> Result<ExitCode> {
    let dir = path.unwrap_or(Path::new("."));
    let file = dir.join(CONFIG_FILE_NAME);

    if file.exists() {
        eprintln!("{} already exists", file.display());
        return Ok(ExitCode::FAILURE);
    }

    let contents = Config::default().to_toml()?;
    std::fs::write(&file, contents).map_err(|source| Error::Io {
        path: file.clone(),
        source,
    })?;

    println!("Initialised {}", file.display());
    Ok(ExitCode::SUCCESS)
}
