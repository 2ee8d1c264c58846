//! The `triage run` command: the interactive sorting loop.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use console::Style;
use triage_core::{
    ClassifyError, Config, CorpusError, Embedder, Network, TriageError, TriageSession,
};

use super::prompt::{ask_class_choice, ask_new_class, ask_yes_no, ClassChoice};
use super::theme::{print_banner, print_classes, triage_theme};
use super::{apply_network, setup, PathArgs};

/// Arguments for the `run` command.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Embedding network (resnet50, vgg16, densenet, mobilenet, inception-v3, xception)
    #[arg(short, long)]
    pub network: Option<Network>,
}

/// Execute the run command.
pub fn execute(args: RunArgs, mut config: Config) -> anyhow::Result<()> {
    args.paths.apply(&mut config);
    apply_network(&mut config, args.network);

    print_banner();

    let engine = setup::load_engine(&config)?;
    setup::require_sorted_dir(&config)?;
    let unsorted_dir = config.unsorted_dir();
    if !unsorted_dir.is_dir() {
        anyhow::bail!("Unsorted folder does not exist: {}", unsorted_dir.display());
    }

    let cyan = Style::new().for_stderr().cyan();
    let dim = Style::new().for_stderr().dim();
    let green = Style::new().for_stderr().green();

    eprintln!("  {}", cyan.apply_to("Loading existing data..."));
    let pb = setup::create_progress_bar();
    let opened = TriageSession::open(&config, engine, |step| setup::update(&pb, &step));
    pb.finish_and_clear();

    let mut session = match opened {
        Ok(session) => session,
        Err(TriageError::Classify(ClassifyError::NoCentroids)) => anyhow::bail!(
            "No class folder under {} contains images.\n\n  \
             Hint: Add at least one example image to each class folder and try again.",
            config.sorted_dir().display()
        ),
        Err(e) => return Err(e.into()),
    };

    let labels = session.ledger().read();
    eprintln!(
        "  {}",
        dim.apply_to(format!(
            "{} labels recorded in {}",
            labels.len(),
            session.ledger().path().display()
        ))
    );

    eprintln!();
    eprintln!("  {}", cyan.apply_to("Available classes:"));
    print_classes(session.classes(), false);

    let theme = triage_theme();
    let yellow = Style::new().for_stderr().yellow();
    let mut sorted = 0usize;
    let mut skipped = HashSet::new();

    loop {
        let Some((image, filename)) = next_image(session.pending()?, &mut skipped) else {
            eprintln!();
            eprintln!("  No images to process in the unsorted folder.");
            break;
        };

        let ranked = session.rank(&image)?;
        let prediction = match ranked.first() {
            Some(best) if !best.distance.is_nan() => best.clone(),
            Some(_) => return Err(TriageError::from(ClassifyError::NoComparableCentroid).into()),
            None => return Err(TriageError::from(ClassifyError::NoCentroids).into()),
        };
        for p in &ranked {
            tracing::debug!("  {:<20} {:.4}", p.class, p.distance);
        }

        eprintln!();
        eprintln!("  Image: {}", filename);
        eprintln!(
            "  Prediction: {} {}",
            green.apply_to(&prediction.class),
            dim.apply_to(format!("(distance {:.3})", prediction.distance))
        );

        let Some(correct) = ask_yes_no(&theme, "Is the prediction correct? (y/n)")? else {
            break;
        };

        let class = if correct {
            prediction.class
        } else {
            eprintln!();
            eprintln!("  {}", cyan.apply_to("Available classes:"));
            print_classes(session.classes(), true);

            match ask_class_choice(&theme, session.classes().len())? {
                Some(ClassChoice::Existing(index)) => session.classes()[index].clone(),
                Some(ClassChoice::New) => {
                    let Some(name) = ask_new_class(&theme)? else {
                        break;
                    };
                    session.add_class(&name)?.to_string()
                }
                None => break,
            }
        };

        match record_decision(&session, &filename, &class)? {
            Recorded::Moved(target) => {
                sorted += 1;
                tracing::debug!("Moved to {}", target.display());
                eprintln!("  {} Image moved to folder {}", green.apply_to("✓"), class);
            }
            Recorded::Rejected(reason) => {
                eprintln!("  {}", yellow.apply_to(reason));
                eprintln!("  Skipping {} for this session.", filename);
                skipped.insert(image);
            }
        }

        match ask_yes_no(&theme, "Do you want to continue? (y/n)")? {
            Some(true) => {}
            _ => break,
        }
    }

    eprintln!();
    eprintln!("  Sorted {} image(s) this session.", sorted);
    if !skipped.is_empty() {
        eprintln!("  Skipped {} image(s).", skipped.len());
    }
    Ok(())
}

/// First pending image not yet skipped, with its file name.
///
/// Names that are not valid UTF-8 cannot go into the ledger; they are
/// warned about and added to `skipped`.
fn next_image(pending: Vec<PathBuf>, skipped: &mut HashSet<PathBuf>) -> Option<(PathBuf, String)> {
    for path in pending {
        if skipped.contains(&path) {
            continue;
        }
        let name = path.file_name().and_then(|n| n.to_str()).map(str::to_string);
        match name {
            Some(name) => return Some((path, name)),
            None => {
                tracing::warn!("Skipping {}: file name is not valid UTF-8", path.display());
                skipped.insert(path);
            }
        }
    }
    None
}

/// Result of trying to persist one decision.
#[derive(Debug)]
enum Recorded {
    Moved(PathBuf),
    /// The decision could not be applied to this image; the message says why
    Rejected(String),
}

/// Record `class` for `filename`. A taken destination, a vanished source or
/// a bad class name only reject this image; other errors end the session.
fn record_decision<E: Embedder>(
    session: &TriageSession<E>,
    filename: &str,
    class: &str,
) -> anyhow::Result<Recorded> {
    match session.record(filename, class) {
        Ok(target) => Ok(Recorded::Moved(target)),
        Err(TriageError::Corpus(
            e @ (CorpusError::DestinationExists(_)
            | CorpusError::MissingImage(_)
            | CorpusError::InvalidClassName { .. }),
        )) => Ok(Recorded::Rejected(e.to_string())),
        Err(e) => Err(e.into()),
    }
}
