// src/cli.rs
use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::Client;
use std::path::PathBuf;
use std::process::ExitCode;

use resume_screen::banner;
use resume_screen::models::ResumeFile;
use resume_screen::ui::{ListingFormat, TerminalSurface};
use resume_screen::{ClientConfig, Dashboard, HttpBackend, JobForm, JobSpec, Result};

#[derive(Parser, Debug)]
#[command(
    name = "resume-screen",
    about = "Post jobs with resumes to the screening service and review the ranked results",
    version
)]
struct Cli {
    /// Read client settings from this TOML file instead of the per-user one
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the backend origin, e.g. http://127.0.0.1:8000
    #[arg(long, global = true)]
    api_base: Option<String>,
    /// How to print the resume listing
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,
    /// Skip the startup banner
    #[arg(long, short, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and show the ranked resumes
    List,
    /// Post a job with resume attachments, then show the refreshed ranking
    Submit(SubmitArgs),
    /// Check that the backend is up
    Health,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
}

impl From<OutputFormat> for ListingFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ListingFormat::Text,
            OutputFormat::Html => ListingFormat::Html,
        }
    }
}

#[derive(Args, Debug)]
struct SubmitArgs {
    /// TOML job description; flags below override its fields
    #[arg(long)]
    job: Option<PathBuf>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    years_needed: Option<String>,
    /// CV quality weight, percent
    #[arg(long)]
    quality: Option<String>,
    /// Relevant experience weight, percent
    #[arg(long)]
    experience: Option<String>,
    /// Years of experience weight, percent
    #[arg(long)]
    years: Option<String>,
    /// Location compatibility weight, percent
    #[arg(long)]
    location: Option<String>,
    /// Resume files to attach
    files: Vec<PathBuf>,
}

impl SubmitArgs {
    async fn into_form(self) -> Result<JobForm> {
        let mut form = match &self.job {
            Some(path) => JobForm::from_spec(&JobSpec::from_path(path)?),
            None => JobForm::new(),
        };

        let overrides = [
            ("job_title", self.title),
            ("description", self.description),
            ("years_needed", self.years_needed),
            ("weight_quality", self.quality),
            ("weight_experience", self.experience),
            ("weight_years", self.years),
            ("weight_location", self.location),
        ];
        for (name, value) in overrides {
            if let Some(value) = value {
                form.set(name, value);
            }
        }

        for path in &self.files {
            form.attach(ResumeFile::from_path(path).await?);
        }
        Ok(form)
    }
}

pub(crate) async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    if !cli.quiet {
        banner::print_banner();
    }

    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
        config.validate()?;
    }
    let ttl = config.notification_ttl;
    let backend = HttpBackend::new(Client::new(), config)?;
    let surface = TerminalSurface::new(cli.format.into());

    let ok = match cli.command {
        Command::Health => {
            let health = backend.check_health().await?;
            println!(
                "✅ Backend is {} ({})",
                health.status,
                health.timestamp.as_deref().unwrap_or("no timestamp")
            );
            true
        }
        Command::List => {
            let mut dashboard = Dashboard::new(backend, surface, ttl);
            dashboard.load_and_render().await.is_ok()
        }
        Command::Submit(args) => {
            let form = args.into_form().await?;
            let mut dashboard = Dashboard::new(backend, surface, ttl);
            dashboard.handle_submit(&form).await.is_ok()
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
