use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use frame_representation::{
    checkpoint, write_top_concepts, Checkpoint, ConceptList, Error, Layer, Network, WordNet,
};

/// Obtain the representation of a video frame with a pre-trained
/// shuffled ImageNet-bank network.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Frame to process
    imagename: PathBuf,

    /// Directory holding the exported checkpoint
    modeldir: PathBuf,

    /// Output layer: `prob` for class probabilities, `fc` for pooled features
    layer: Layer,

    /// WordNet identifiers, one per class, used to label `prob` output
    wnidfile: Option<PathBuf>,

    /// Checkpoint file prefix
    #[arg(long, default_value = checkpoint::DEFAULT_PREFIX)]
    prefix: String,

    /// Checkpoint epoch
    #[arg(long, default_value_t = checkpoint::DEFAULT_EPOCH)]
    epoch: u32,

    /// Number of concepts to print
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// WordNet database directory
    #[arg(long, env = "WNSEARCHDIR")]
    wordnet: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Explicit directory, or the NLTK corpus if it is installed.
fn open_wordnet(explicit: Option<PathBuf>) -> anyhow::Result<Option<WordNet>> {
    if let Some(dir) = explicit {
        return WordNet::open(dir).map(Some).context("failed to open WordNet database");
    }

    let wordnet = WordNet::discover();

    if wordnet.is_none() {
        tracing::warn!("no WordNet database found, printing raw identifiers");
    }

    Ok(wordnet)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose);

    // nothing is loaded until the frame is known to exist
    if !args.imagename.exists() {
        return Err(Error::ImageNotFound(args.imagename).into());
    }

    let checkpoint = Checkpoint::new(&args.modeldir)
        .with_prefix(&args.prefix)
        .with_epoch(args.epoch);

    let network = Network::load(&checkpoint, args.layer)
        .with_context(|| format!("failed to load {}", checkpoint.path().display()))?;

    let features = network
        .extract(&args.imagename)
        .with_context(|| format!("failed to process {}", args.imagename.display()))?;

    println!("Obtained features: {}", features.shape());

    let Some(wnidfile) = args.wnidfile else {
        return Ok(());
    };

    if args.layer != Layer::Prob {
        tracing::warn!(layer = %args.layer, "concept file only applies to prob output, ignoring");
        return Ok(());
    }

    let concepts = ConceptList::from_path(&wnidfile)?;
    let wordnet = open_wordnet(args.wordnet)?;

    if concepts.len() != features.len() {
        tracing::warn!(
            concepts = concepts.len(),
            classes = features.len(),
            "concept list does not match the number of classes"
        );
    }

    write_top_concepts(
        &mut std::io::stdout().lock(),
        &features,
        &concepts,
        wordnet.as_ref(),
        args.top,
    )
    .context("failed to label predictions")?;

    Ok(())
}
