//! Clusters a small class by homework and final exam score and prints each
//! frame as text.
//!
//! Pass `--debug` to see every iteration and `--seed <n>` for a reproducible
//! run. Library diagnostics go to stderr; set `RUST_LOG=debug` to see every
//! iteration's stability count.

use clap::Parser;
use env_logger::Env;
use lloyd::k_means::default_palette;
use lloyd::{ClusterObserver, Dataset, Frame, KMeans, KMeansConfig, Termination};

/// Cluster a class by homework and final exam score.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Number of clusters.
    #[arg(short, long, default_value_t = 3)]
    k: usize,

    /// Seed for centroid initialization. Without it every run draws fresh
    /// entropy and is not reproducible.
    #[arg(long)]
    seed: Option<u64>,

    /// Print every pass, not only the final clustering.
    #[arg(long)]
    debug: bool,
}

const STUDENT_GRADES: [(&str, f64, f64); 26] = [
    ("Alice", 93.0, 88.0),
    ("Bob", 55.0, 55.0),
    ("Charles", 90.0, 87.0),
    ("Dave", 63.0, 57.0),
    ("Ellen", 89.0, 88.0),
    ("Frita", 90.0, 91.0),
    ("Grant", 70.0, 86.0),
    ("Heidi", 98.0, 96.0),
    ("Isabelle", 77.0, 87.0),
    ("Jack", 80.0, 94.0),
    ("Kate", 60.0, 86.0),
    ("Lisa", 85.0, 86.0),
    ("Mary", 90.0, 89.0),
    ("Nancy", 63.0, 58.0),
    ("Orville", 88.0, 61.0),
    ("Peter", 95.0, 58.0),
    ("Quinton", 83.0, 89.0),
    ("Ralph", 57.0, 65.0),
    ("Sally", 67.0, 65.0),
    ("Trent", 62.0, 62.0),
    ("Ursala", 65.0, 53.0),
    ("Violet", 82.0, 90.0),
    ("Wally", 91.0, 93.0),
    ("Xavier", 81.0, 84.0),
    ("Yolanda", 90.0, 63.0),
    ("Zack", 85.0, 56.0),
];

struct TextRenderer {
    x_label: &'static str,
    y_label: &'static str,
}

impl TextRenderer {
    fn render(&self, title: &str, frame: Frame<'_, &'static str>) {
        println!("== {} ({} vs {})", title, self.x_label, self.y_label);
        for ((cluster, centroid), color) in frame
            .clusters
            .iter()
            .zip(frame.centroids)
            .zip(frame.colors)
        {
            let members: Vec<String> = cluster
                .iter()
                .map(|name| {
                    let p = &frame.dataset[name];
                    format!("{} ({}, {})", name, p[0], p[1])
                })
                .collect();
            println!(
                "  [{:>11}] centroid ({:.2}, {:.2}): {}",
                color,
                centroid[0],
                centroid[1],
                members.join(", ")
            );
        }
    }
}

impl ClusterObserver<&'static str> for TextRenderer {
    fn on_iteration(&mut self, iteration: usize, frame: Frame<'_, &'static str>) {
        self.render(&format!("pass {}", iteration), frame);
    }

    fn on_converged(&mut self, frame: Frame<'_, &'static str>) {
        self.render("final", frame);
    }

    fn on_terminated(&mut self, termination: Termination, frame: Frame<'_, &'static str>) {
        if termination == Termination::BudgetExhausted {
            self.render("last computed, not converged", frame);
        }
    }
}

fn init_logging(env: Env<'_>) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::from_env(env).try_init()
}

fn main() {
    if let Err(err) = init_logging(Env::default().default_filter_or("info")) {
        eprintln!("logger already installed: {}", err);
    }
    let args = Args::parse();

    let data: Dataset<&'static str> = STUDENT_GRADES
        .iter()
        .map(|&(name, homework, exam)| (name, vec![homework, exam]))
        .collect();

    let mut config = KMeansConfig::new(args.k)
        .with_debug(args.debug)
        .with_palette(default_palette(args.k));
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let renderer = TextRenderer {
        x_label: "Homework Scores",
        y_label: "Final Exam Scores",
    };
    let mut kmeans = KMeans::new(config).with_observer(renderer);
    match kmeans.run(&data) {
        Ok(result) => println!(
            "Process took {} passes of a possible {} for {} clusters.",
            result.iterations,
            result.budget,
            kmeans.config().k
        ),
        Err(err) => {
            eprintln!("clustering failed: {}", err);
            std::process::exit(1);
        }
    }
}
