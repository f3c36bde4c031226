use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use lotto_cli::analysis::sampler::SamplingStrategy;
use lotto_cli::analysis::uniform::sample_uniform;
use lotto_cli::analysis::{bonus_frequencies, compute_stats, main_frequencies};
use lotto_cli::config::{GameConfig, load_config, save_config};
use lotto_cli::display::{display_history, display_report, display_stats, display_uniform};
use lotto_cli::report::analyze;
use lotto_data::loader::load_path;
use lotto_data::models::{DrawHistory, validate_record};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Exact,
    Rejection,
}

#[derive(Parser)]
#[command(name = "lotto", about = "Générateur de grilles pondéré par l'historique des tirages")]
struct Cli {
    /// Fichier de configuration JSON (voir `lotto config`)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Générer une grille pondérée par les fréquences historiques
    Generate {
        /// Chemin vers le fichier CSV des tirages
        #[arg(short, long, default_value = "assets/lotto649_sample.csv")]
        file: PathBuf,

        /// Nombre de numéros à tirer
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Plus grand numéro tirable
        #[arg(short, long)]
        range: Option<usize>,

        /// Méthode de tirage
        #[arg(long)]
        strategy: Option<StrategyArg>,

        /// Nombre maximal de tirages pour la méthode par rejet (défaut : 100000)
        #[arg(long)]
        max_attempts: Option<usize>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Vérifier les bornes et doublons de chaque tirage
        #[arg(long)]
        validate: bool,

        /// Sortie JSON
        #[arg(long)]
        json: bool,
    },

    /// Tirage purement aléatoire, sans historique
    Randomize {
        #[arg(short = 'n', long)]
        count: Option<usize>,

        #[arg(short, long)]
        range: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },

    /// Lister les tirages du fichier
    History {
        #[arg(short, long, default_value = "assets/lotto649_sample.csv")]
        file: PathBuf,

        /// Nombre de tirages à afficher (les derniers du fichier)
        #[arg(short, long)]
        last: Option<usize>,
    },

    /// Afficher les fréquences par numéro
    Stats {
        #[arg(short, long, default_value = "assets/lotto649_sample.csv")]
        file: PathBuf,

        #[arg(short, long)]
        range: Option<usize>,
    },

    /// Écrire la configuration par défaut
    Config {
        #[arg(short, long, default_value = "lotto.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };

    match cli.command {
        Command::Generate {
            file,
            count,
            range,
            strategy,
            max_attempts,
            seed,
            validate,
            json,
        } => {
            apply_overrides(&mut config, count, range);
            match strategy {
                Some(StrategyArg::Exact) => config.strategy = SamplingStrategy::Exact,
                Some(StrategyArg::Rejection) => config.use_rejection(max_attempts),
                None => {}
            }
            cmd_generate(&config, &file, seed, validate, json)
        }
        Command::Randomize {
            count,
            range,
            seed,
            json,
        } => {
            apply_overrides(&mut config, count, range);
            cmd_randomize(&config, seed, json)
        }
        Command::History { file, last } => {
            let history = load_history(&file)?;
            display_history(&history, last);
            Ok(())
        }
        Command::Stats { file, range } => {
            apply_overrides(&mut config, None, range);
            cmd_stats(&config, &file)
        }
        Command::Config { output } => {
            save_config(&config, &output)?;
            println!("Configuration sauvegardée dans {}", output.display());
            Ok(())
        }
    }
}

fn apply_overrides(config: &mut GameConfig, count: Option<usize>, range: Option<usize>) {
    if let Some(count) = count {
        config.game.pick_count = count;
    }
    if let Some(range) = range {
        config.game.main_max = range;
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

fn load_history(file: &Path) -> Result<DrawHistory> {
    let history = load_path(file).with_context(|| format!("Échec du chargement de {:?}", file))?;
    info!("{} tirages chargés", history.len());
    if history.is_empty() {
        warn!("Aucun tirage dans {:?} : le tirage sera uniforme", file);
    }
    Ok(history)
}

fn cmd_generate(
    config: &GameConfig,
    file: &Path,
    seed: Option<u64>,
    validate: bool,
    json: bool,
) -> Result<()> {
    let history = load_history(file)?;

    if validate {
        for (i, record) in history.records().enumerate() {
            validate_record(&record, &config.game)
                .with_context(|| format!("Tirage {} invalide", i + 1))?;
        }
    }

    let mut rng = make_rng(seed);
    let report = analyze(&history, config, &mut rng).context("Échec de la génération")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_report(&report);
    }
    Ok(())
}

fn cmd_randomize(config: &GameConfig, seed: Option<u64>, json: bool) -> Result<()> {
    let mut rng = make_rng(seed);
    let numbers = sample_uniform(config.game.pick_count, config.game.main_max, &mut rng)
        .context("Échec du tirage aléatoire")?;

    if json {
        println!("{}", serde_json::to_string(&numbers)?);
    } else {
        display_uniform(&numbers);
    }
    Ok(())
}

fn cmd_stats(config: &GameConfig, file: &Path) -> Result<()> {
    let history = load_history(file)?;
    let main_stats = compute_stats(&main_frequencies(&history), config.game.main_max);
    let bonus_stats = compute_stats(&bonus_frequencies(&history), config.game.bonus_max);
    display_stats(&main_stats, &bonus_stats, history.len());
    Ok(())
}
