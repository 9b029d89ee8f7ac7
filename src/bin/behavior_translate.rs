//! Batch front end: translate every behavior in a definitions file, or a single behavior given
//! with `-e`.
//!
//! Set `RUST_LOG=debug` to see each reduction as it fires.

use std::env;
use std::mem;
use std::process;

use behavior_ir::config::{BatchOptions, TranslatorOptions};
use behavior_ir::driver::BatchRunner;
use behavior_ir::loader::DefinitionSet;
use behavior_ir::loader::behavior::Lexer;
use behavior_ir::trace::ReductionPrinter;
use behavior_ir::{BehaviorError, Translator};

struct Cli {
    definitions: Option<String>,
    expression: Option<String>,
    tokens_only: bool,
    trace: bool,
    quiet: bool,
    translator: TranslatorOptions,
    batch: BatchOptions,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage(program_name(&args));
            process::exit(1);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Cli, String> {
    let mut cli = Cli {
        definitions: None,
        expression: None,
        tokens_only: false,
        trace: false,
        quiet: false,
        translator: TranslatorOptions::default(),
        batch: BatchOptions::default(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-e" | "--expr" => {
                cli.expression = Some(value_of(args, i, "-e")?);
                i += 2;
            }
            "--filter" => {
                cli.batch.filter = Some(value_of(args, i, "--filter")?);
                i += 2;
            }
            "--width" => {
                let raw = value_of(args, i, "--width")?;
                let width: u32 = raw
                    .parse()
                    .map_err(|_| format!("--width expects a bit count, got '{raw}'"))?;
                if width == 0 {
                    return Err("--width must be non-zero".into());
                }
                cli.translator.operand_width = width;
                i += 2;
            }
            "--temp-prefix" => {
                let raw = value_of(args, i, "--temp-prefix")?;
                cli.translator = mem::take(&mut cli.translator)
                    .with_temporary_prefix(raw)
                    .map_err(|err| err.to_string())?;
                i += 2;
            }
            "--fresh-temporaries" => {
                cli.batch.fresh_temporaries = true;
                i += 1;
            }
            "--tokens" => {
                cli.tokens_only = true;
                i += 1;
            }
            "--trace" => {
                cli.trace = true;
                i += 1;
            }
            "-q" | "--quiet" => {
                cli.quiet = true;
                i += 1;
            }
            "-h" | "--help" => {
                print_usage(program_name(args));
                process::exit(0);
            }
            other if other.starts_with('-') => return Err(format!("unknown option '{other}'")),
            path => {
                cli.definitions = Some(path.to_string());
                i += 1;
            }
        }
    }

    if cli.definitions.is_none() && cli.expression.is_none() {
        return Err("expected a definitions file or -e <behavior>".into());
    }
    Ok(cli)
}

fn program_name(args: &[String]) -> &str {
    args.first().map_or("behavior-translate", String::as_str)
}

fn value_of(args: &[String], i: usize, flag: &str) -> Result<String, String> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn run(cli: Cli) -> Result<(), BehaviorError> {
    if let Some(text) = &cli.expression {
        if cli.tokens_only {
            for token in Lexer::new(text).tokenize()? {
                println!(
                    "{:>3}:{:<3} {:?} {:?}",
                    token.line, token.column, token.kind, token.lexeme
                );
            }
            return Ok(());
        }
        let mut translator = Translator::new(cli.translator.clone());
        let instructions = if cli.trace {
            translator.translate_with_tracer(text, &mut ReductionPrinter::stdout())?
        } else {
            translator.translate(text)?
        };
        for instruction in instructions {
            println!("{instruction}");
        }
        return Ok(());
    }

    let Some(path) = &cli.definitions else {
        return Ok(());
    };
    let definitions = DefinitionSet::from_path(path)?;
    let translator = Translator::new(cli.translator.clone());
    let mut runner = BatchRunner::new(translator, cli.batch.clone());
    if cli.trace {
        runner = runner.with_tracer(Box::new(ReductionPrinter::stdout()));
    }
    let report = runner.run(&definitions)?;

    if !cli.quiet {
        for translated in &report.translated {
            println!("{}:", translated.mnemonic);
            for instruction in &translated.instructions {
                println!("    {instruction}");
            }
        }
        for failure in &report.failures {
            println!("{}: {}", failure.mnemonic, failure.diagnostic.format_human());
        }
    }

    let mut histogram: Vec<_> = report.failure_histogram().into_iter().collect();
    histogram.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for (code, count) in histogram {
        eprintln!("{count:>6} {code}");
    }
    eprintln!("{}", report.summary());
    Ok(())
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program} <definitions.tsv> [options]   Translate every definition");
    println!("  {program} -e <behavior> [options]       Translate one behavior string");
    println!();
    println!("Options:");
    println!("  --filter TEXT          Only translate behaviors containing TEXT");
    println!("  --width N              Operand width in bits (default 32)");
    println!("  --temp-prefix TEXT     Temporary name prefix (default t)");
    println!("  --fresh-temporaries    Restart temporary numbering for every behavior");
    println!("  --tokens               With -e, print the token stream instead");
    println!("  --trace                Print every reduction as it fires");
    println!("  -q, --quiet            Only print the summary");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_argv_falls_back_to_the_binary_name() {
        assert_eq!(program_name(&[]), "behavior-translate");
        assert_eq!(program_name(&["bt".to_string()]), "bt");
    }

    #[test]
    fn register_like_temp_prefix_is_rejected() {
        let args: Vec<String> = ["bt", "-e", "Rd=Rs;", "--temp-prefix", "R"]
            .iter()
            .map(|arg| arg.to_string())
            .collect();
        let message = parse_args(&args).err().expect("rejected");
        assert!(message.contains("temporary prefix"), "{message}");
    }
}
