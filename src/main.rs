//! Cantolex
//!
//! Command-line front end for the Cantolex lexer.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use cantolex::frontend::{Lexer, SymbolTable, Token, TokenKind};
use cantolex::utils::Error;

const PROMPT: &str = ">> ";

/// Cantolex
#[derive(Parser, Debug)]
#[command(name = "cantolex")]
#[command(author = "Z1529")]
#[command(version = "0.1.0")]
#[command(about = "Cantolex - tokenizer for a Cantonese-keyword programming language")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    table: TableArgs,

    #[command(flatten)]
    output: OutputArgs,
}

/// Symbol table selection
#[derive(Args, Debug)]
struct TableArgs {
    /// Also accept ASCII punctuation: ( ) { } ; ,
    #[arg(long, global = true)]
    ascii: bool,

    /// Also accept word operators: 加 減 乘 除
    #[arg(long, global = true)]
    word_operators: bool,

    /// Load the symbol table from a JSON file instead of the built-in one
    #[arg(long, global = true, value_name = "FILE")]
    symbols: Option<PathBuf>,
}

/// Token printing options
#[derive(Args, Debug, Clone, Copy)]
struct OutputArgs {
    /// Print tokens as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Leave comment tokens out of the listing
    #[arg(long, global = true)]
    skip_comments: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tokens of a source file
    Tokens {
        /// Input source file
        input: PathBuf,
    },
    /// Report invalid characters in a source file
    Check {
        /// Input source file
        input: PathBuf,
    },
    /// Tokenize lines read from standard input
    Repl,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let table = load_table(&cli.table)?;

    match &cli.command {
        Some(Commands::Tokens { input }) => print_tokens(input, &table, cli.output),
        Some(Commands::Check { input }) => check_file(input, &table),
        Some(Commands::Repl) => repl(&table, cli.output),
        None => match cli.input {
            Some(ref input) => print_tokens(input, &table, cli.output),
            None => {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: cantolex <FILE> or cantolex tokens <FILE>");
                Ok(1)
            }
        },
    }
}

fn load_table(args: &TableArgs) -> Result<SymbolTable> {
    let mut table = match &args.symbols {
        Some(path) => {
            log::info!("loading symbol table from {}", path.display());
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading symbol table {}", path.display()))?;
            SymbolTable::from_json(&text)
                .with_context(|| format!("parsing symbol table {}", path.display()))?
        }
        None => SymbolTable::cantonese(),
    };
    if args.ascii {
        log::debug!("enabling ASCII punctuation aliases");
        table = table.with_ascii_aliases();
    }
    if args.word_operators {
        log::debug!("enabling word operators");
        table = table.with_word_operators();
    }
    table.validate().context("checking symbol table")?;
    Ok(table)
}

fn read_source(input: &Path) -> Result<String> {
    log::info!("reading {}", input.display());
    fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
}

/// Print every token of a file
fn print_tokens(input: &Path, table: &SymbolTable, output: OutputArgs) -> Result<i32> {
    let source = read_source(input)?;
    let tokens = collect_tokens(&source, table, output.skip_comments);

    let mut stdout = io::stdout().lock();
    write_tokens(&mut stdout, &tokens, output.json)?;
    Ok(0)
}

/// Check a source file for invalid characters
fn check_file(input: &Path, table: &SymbolTable) -> Result<i32> {
    let source = read_source(input)?;
    let invalid: Vec<_> = Lexer::new(&source, table)
        .filter_map(|token| token.into_result().err())
        .collect();

    for err in &invalid {
        match err.span() {
            Some(span) => eprintln!("{}:{}: {}", input.display(), span, diagnose(err, table)),
            None => eprintln!("{}: {}", input.display(), diagnose(err, table)),
        }
    }

    if invalid.is_empty() {
        println!("✅ No invalid characters in {}", input.display());
        Ok(0)
    } else {
        Ok(1)
    }
}

/// Describe an error, suggesting the active spelling when the offending
/// character is an alias that the current table does not accept
fn diagnose(err: &Error, table: &SymbolTable) -> String {
    let ch = match err {
        Error::InvalidCharacter { ch, .. } => *ch,
        _ => return err.to_string(),
    };
    let known = SymbolTable::cantonese().with_ascii_aliases().with_word_operators();
    match known.single(ch).and_then(|kind| table.literal_of(kind)) {
        Some(literal) => format!("{} (did you mean '{}'?)", err, literal),
        None => err.to_string(),
    }
}

/// Tokenize standard input one line at a time
fn repl(table: &SymbolTable, output: OutputArgs) -> Result<i32> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    write!(stdout, "{}", PROMPT)?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line.context("reading standard input")?;
        let mut tokens = collect_tokens(&line, table, output.skip_comments);
        tokens.retain(|t| !t.is_eof());
        write_tokens(&mut stdout, &tokens, output.json)?;
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;
    }
    writeln!(stdout)?;
    Ok(0)
}

fn collect_tokens(source: &str, table: &SymbolTable, skip_comments: bool) -> Vec<Token> {
    Lexer::new(source, table)
        .filter(|t| !(skip_comments && t.kind == TokenKind::Comment))
        .collect()
}

fn write_tokens(out: &mut impl Write, tokens: &[Token], json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(tokens).context("serializing tokens")?;
        writeln!(out, "{}", text)?;
    } else {
        for token in tokens {
            writeln!(out, "{} @{}", token, token.span)?;
        }
    }
    Ok(())
}
