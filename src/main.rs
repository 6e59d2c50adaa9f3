use std::{
    env,
    fs::{self, read_to_string},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};
use vortexc::{
    compile,
    compiler::isa::Register,
    config::{CompileOptions, Dialect},
    format_error,
    machine::machine::run_text,
};

const USAGE: &str = "usage: vortexc <source> [-o <out.as>] [--dialect cs|vsc] [--run]";

struct Args {
    source: PathBuf,
    output: Option<PathBuf>,
    dialect: Option<Dialect>,
    run: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut source = None;
    let mut output = None;
    let mut dialect = None;
    let mut run = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                let path = iter.next().ok_or("missing path after -o")?;
                output = Some(PathBuf::from(path));
            }
            "--dialect" => {
                let name = iter.next().ok_or("missing name after --dialect")?;
                dialect = Some(Dialect::from_name(name).ok_or(format!("unknown dialect `{}`", name))?);
            }
            "--run" => run = true,
            flag if flag.starts_with('-') => return Err(format!("unknown option `{}`", flag)),
            path if source.is_none() => source = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument `{}`", extra)),
        }
    }

    Ok(Args {
        source: source.ok_or("no source file given")?,
        output,
        dialect,
        run,
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn default_output(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("out"));

    PathBuf::from("build").join(format!("{}.as", stem))
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}\n{}", message, USAGE);
            return ExitCode::from(2);
        }
    };

    let start = Instant::now();

    let file_contents = match read_to_string(&args.source) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Failed to read {}: {}", args.source.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let file_name = args
        .source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let options = CompileOptions::new(args.dialect.unwrap_or_else(|| Dialect::from_path(&args.source)));

    let assembly = match compile(&file_contents, file_name, &options) {
        Ok(assembly) => assembly,
        Err(error) => {
            eprintln!("{}", format_error(&error, &file_contents));
            return ExitCode::FAILURE;
        }
    };

    info!(elapsed = ?start.elapsed(), lines = assembly.lines().count(), "compiled");

    let output = args.output.unwrap_or_else(|| default_output(&args.source));
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        if let Err(err) = fs::create_dir_all(parent) {
            eprintln!("Failed to create {}: {}", parent.display(), err);
            return ExitCode::FAILURE;
        }
    }
    if let Err(err) = fs::write(&output, &assembly) {
        eprintln!("Failed to write {}: {}", output.display(), err);
        return ExitCode::FAILURE;
    }

    info!(path = %output.display(), "wrote assembly");

    if args.run {
        let run_start = Instant::now();
        let machine = match run_text(&assembly) {
            Ok(machine) => machine,
            Err(err) => {
                eprintln!("Execution failed: {}", err);
                return ExitCode::FAILURE;
            }
        };

        info!(elapsed = ?run_start.elapsed(), steps = machine.steps(), "ran program");
        println!("r1 = {}", machine.register(Register::RESULT));
        for address in 0..=u8::MAX {
            let value = machine.memory(address);
            if value != 0 {
                println!("mem[{}] = {}", address, value);
            }
        }
    }

    ExitCode::SUCCESS
}
