mod filter;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use hashbrown::HashMap;
use sliding_ngrams::{NgramIterator, TokenSource};

use filter::FilterConfig;

const MAX_N_LIMIT: usize = 1 << 16;
const PROGRESS_INTERVAL: usize = 1_000_000;

#[derive(Parser, Debug)]
#[clap(
    name = "ngrams",
    about = "A program to enumerate n-grams of whitespace-delimited words."
)]
struct Args {
    /// File path to an input text. If None, the standard input is read.
    #[clap(short = 'i', long)]
    input_path: Option<PathBuf>,

    /// Minimum number of words in an n-gram (0 is treated as 1).
    #[clap(short = 'n', long, default_value = "1")]
    min_n: usize,

    /// Maximum number of words in an n-gram (raised to min_n if smaller).
    #[clap(short = 'm', long, default_value = "3")]
    max_n: usize,

    /// Skips words starting with this string. Can be given multiple times.
    #[clap(short = 'x', long)]
    exclude_prefix: Vec<String>,

    /// Skips words shorter than this number of bytes.
    #[clap(short = 'l', long, default_value = "1")]
    min_token_len: usize,

    /// File path to whitespace-separated words to be skipped.
    #[clap(short = 'w', long)]
    stopwords_path: Option<PathBuf>,

    /// Prints the number of occurrences of each distinct n-gram instead of the n-grams.
    #[clap(short = 'c', long)]
    count: bool,

    /// Prints only the most frequent n-grams in the count mode.
    #[clap(short = 'k', long, requires = "count")]
    top_k: Option<usize>,

    /// Increases the logging verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short = 'v', long, parse(from_occurrences))]
    verbose: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    log::debug!("Arguments: {:?}", args);

    if args.max_n > MAX_N_LIMIT {
        bail!("max_n must not exceed {MAX_N_LIMIT}.");
    }

    let mut config = FilterConfig::new()
        .exclude_prefixes(&args.exclude_prefix)
        .min_token_len(args.min_token_len);
    if let Some(path) = &args.stopwords_path {
        let file = File::open(path)
            .with_context(|| format!("Failed to open stopwords {}", path.display()))?;
        config = config.stopwords(BufReader::new(file))?;
    }

    let rdr: Box<dyn Read> = match &args.input_path {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };
    let mut iter = NgramIterator::from_reader(rdr, args.min_n, args.max_n);
    if !config.is_trivial() {
        iter.set_filter(move |token| config.accepts(token))?;
    }
    log::info!(
        "Enumerating n-grams with min_n={},max_n={}...",
        iter.min_n(),
        iter.max_n()
    );

    let start = Instant::now();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let num_grams = if args.count {
        let counts = count_grams(&mut iter)?;
        let num_grams: usize = counts.iter().map(|(_, c)| c).sum();
        log::info!("Found {} distinct n-grams", counts.len());
        let top_k = args.top_k.unwrap_or(counts.len());
        for (gram, cnt) in counts.into_iter().take(top_k) {
            write!(out, "{cnt}\t")?;
            out.write_all(&gram)?;
            out.write_all(b"\n")?;
        }
        num_grams
    } else {
        write_grams(&mut iter, &mut out)?
    };
    out.flush()?;

    log::info!(
        "Produced {} n-grams in {} sec",
        num_grams,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn init_logging(verbose: usize) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn write_gram<W>(out: &mut W, gram: &[Vec<u8>]) -> io::Result<()>
where
    W: Write,
{
    for (i, token) in gram.iter().enumerate() {
        if i != 0 {
            out.write_all(b" ")?;
        }
        out.write_all(token)?;
    }
    Ok(())
}

fn write_grams<S, W>(iter: &mut NgramIterator<S>, out: &mut W) -> Result<usize>
where
    S: TokenSource,
    W: Write,
{
    let mut num_grams = 0;
    while let Some(gram) = iter.next_gram()? {
        write_gram(out, gram)?;
        out.write_all(b"\n")?;
        num_grams += 1;
        if num_grams % PROGRESS_INTERVAL == 0 {
            log::info!("Processed {num_grams} n-grams...");
        }
    }
    Ok(num_grams)
}

/// Counts distinct grams, sorted by descending count and then by the gram.
fn count_grams<S>(iter: &mut NgramIterator<S>) -> Result<Vec<(Vec<u8>, usize)>>
where
    S: TokenSource,
{
    let mut counter = HashMap::<Vec<u8>, usize>::new();
    let mut key: Vec<u8> = vec![];
    let mut num_grams = 0;
    while let Some(gram) = iter.next_gram()? {
        key.clear();
        write_gram(&mut key, gram)?;
        if let Some(cnt) = counter.get_mut(key.as_slice()) {
            *cnt += 1;
        } else {
            counter.insert(key.clone(), 1);
        }
        num_grams += 1;
        if num_grams % PROGRESS_INTERVAL == 0 {
            log::info!("Processed {num_grams} n-grams...");
        }
    }
    let mut counts: Vec<_> = counter.into_iter().collect();
    counts.sort_unstable_by(|(x, cx), (y, cy)| cy.cmp(cx).then_with(|| x.cmp(y)));
    Ok(counts)
}
