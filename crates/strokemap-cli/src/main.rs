mod reports;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use strokemap_analytics::{AnalysisContext, MatrixSort, QuickFilter};
use strokemap_core::{AnalysisProfile, AppConfig, CertificationTier};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "strokemap")]
#[command(about = "Stroke-care network coverage and expansion analytics")]
struct Cli {
    /// Hospital dataset (JSON array); overrides `STROKEMAP_DATA_PATH`
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Analysis profile (YAML); overrides `STROKEMAP_PROFILE_PATH`
    #[arg(long, global = true)]
    profile: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank hospitals by expansion priority
    Rank {
        /// Number of candidates to show (defaults to `STROKEMAP_TOP_N`)
        #[arg(long)]
        top: Option<usize>,
        /// Only rank hospitals in this state (e.g., WA)
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List hospitals more than 100 miles from an EVT center
    Deserts {
        #[arg(long)]
        json: bool,
    },
    /// List hospitals with no certification and no network partnership
    ZeroCapability {
        #[arg(long)]
        json: bool,
    },
    /// Distance from every hospital to its nearest advanced and EVT centers
    Matrix {
        /// Sort column: name, state, advanced, evt
        #[arg(long, default_value = "name")]
        sort: MatrixSort,
        #[arg(long)]
        json: bool,
    },
    /// Referral links from each hospital to its nearest advanced center
    Pathways {
        #[arg(long)]
        json: bool,
    },
    /// Estimate transfer time to the reference facility
    Transfer {
        /// CMS identifier of the sending hospital
        cms_id: String,
    },
    /// Select hospitals by service-gap criteria
    Filter(FilterArgs),
    /// Print the executive coverage summary
    Summary {
        /// Number of expansion targets to list (defaults to `STROKEMAP_TOP_N`)
        #[arg(long)]
        top: Option<usize>,
    },
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Exclude network partners
    #[arg(long)]
    not_partner: bool,
    /// Exclude certified hospitals
    #[arg(long)]
    no_cert: bool,
    /// Only hospitals with no certification and no partnership
    #[arg(long)]
    zero_capability: bool,
    /// Keep hospitals farther than this from an advanced center
    #[arg(long)]
    min_advanced_miles: Option<f64>,
    /// Keep hospitals farther than this from an EVT center
    #[arg(long)]
    min_evt_miles: Option<f64>,
    /// Restrict to one state (e.g., ID)
    #[arg(long)]
    state: Option<String>,
    /// Preset cohort: no-cert, uw-only, evt-desert, expansion, or a state code
    #[arg(long)]
    quick: Option<QuickFilter>,
    /// Keep hospitals certified at this tier (repeatable; CSC, TSC, PSC, ASR)
    #[arg(long = "tier")]
    tiers: Vec<CertificationTier>,
    /// Keep network partners
    #[arg(long)]
    partners: bool,
    /// Keep EVT-capable hospitals
    #[arg(long)]
    evt: bool,
    /// Case-insensitive name or address search
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = strokemap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let ctx = load_context(&config, cli.data.as_deref(), cli.profile.as_deref()).await?;

    match cli.command {
        Commands::Rank { top, state, json } => {
            reports::run_rank(&ctx, top.unwrap_or(config.top_n), state.as_deref(), json)?;
        }
        Commands::Deserts { json } => reports::run_deserts(&ctx, json)?,
        Commands::ZeroCapability { json } => reports::run_zero_capability(&ctx, json)?,
        Commands::Matrix { sort, json } => reports::run_matrix(&ctx, sort, json)?,
        Commands::Pathways { json } => reports::run_pathways(&ctx, json)?,
        Commands::Transfer { cms_id } => reports::run_transfer(&ctx, &cms_id)?,
        Commands::Filter(args) => {
            let json = args.json;
            reports::run_filter(&ctx, &args.into_selection(), json)?;
        }
        Commands::Summary { top } => reports::run_summary(&ctx, top.unwrap_or(config.top_n)),
    }

    Ok(())
}

impl FilterArgs {
    fn into_selection(self) -> reports::Selection {
        reports::Selection {
            quick: self.quick,
            gaps: strokemap_analytics::HospitalFilter {
                not_partner: self.not_partner,
                no_certification: self.no_cert,
                zero_capability: self.zero_capability,
                min_advanced_miles: self.min_advanced_miles,
                min_evt_miles: self.min_evt_miles,
                state: self.state,
            },
            categories: strokemap_analytics::CategoryFilter {
                tiers: self.tiers,
                partners: self.partners,
                evt: self.evt,
                search: self.search,
            },
        }
    }
}

/// Load the dataset and profile, then build the analysis context.
///
/// Command-line paths win over the environment. Without any profile path
/// the built-in defaults apply.
///
/// # Errors
///
/// Returns an error if the dataset cannot be read or is not a JSON array,
/// or if the profile cannot be read or fails validation.
async fn load_context(
    config: &AppConfig,
    data: Option<&Path>,
    profile: Option<&Path>,
) -> anyhow::Result<AnalysisContext> {
    let data_path = data.unwrap_or(config.data_path.as_path());
    let payload = tokio::fs::read_to_string(data_path).await.map_err(|e| {
        anyhow::anyhow!("failed to read dataset {}: {e}", data_path.display())
    })?;
    let report = strokemap_core::parse_hospitals(&payload)?;
    if !report.rejected.is_empty() {
        eprintln!(
            "warning: {} of {} records rejected; see log for details",
            report.rejected.len(),
            report.total_records
        );
    }

    let profile = match profile.or(config.profile_path.as_deref()) {
        Some(path) => strokemap_core::load_profile(path)?,
        None => AnalysisProfile::default(),
    };

    Ok(AnalysisContext::build(report.hospitals, profile))
}
