use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use jobtrends::llm::AdviceRequest;
use jobtrends::models::MarketReport;
use jobtrends::{
    AdviceBackend, ClassifierKeywords, ClaudeProvider, CollectionPipeline, Config, FeedClient,
    LLMProvider, MarketAnalyzer, OllamaProvider, PostingStore, ReportConfig, SkillVocabulary,
    TechClassifier,
};

#[derive(Parser, Debug)]
#[command(name = "jobtrends")]
#[command(version = "0.1.0")]
#[command(about = "Track remote tech job postings and the skills they ask for")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the job feed once and store new tech postings
    Collect,

    /// Print the market report for the stored postings
    Report {
        /// Output format (text, markdown, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Only include postings from this category (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// Number of skills to rank
        #[arg(long, default_value = "20")]
        top_skills: usize,

        /// Number of top skills in the co-occurrence table
        #[arg(long, default_value = "15")]
        matrix_skills: usize,

        /// Ask the advice model a career question about this market
        #[arg(long)]
        ask: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("jobtrends=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    match args.command {
        Command::Collect => collect(&config).await,
        Command::Report {
            format,
            output,
            categories,
            top_skills,
            matrix_skills,
            ask,
        } => {
            let report_config = ReportConfig {
                top_skills,
                matrix_skills,
                categories,
                ..ReportConfig::default()
            };
            report(&config, &report_config, &format, output.as_deref(), ask.as_deref()).await
        }
    }
}

async fn collect(config: &Config) -> anyhow::Result<()> {
    let keywords = match &config.classifier_path {
        Some(path) => ClassifierKeywords::from_json_file(path)?,
        None => ClassifierKeywords::default(),
    };

    let feed = FeedClient::new(&config.user_agent, config.fetch.clone())?;
    let pipeline = CollectionPipeline::new(
        feed,
        TechClassifier::new(keywords),
        PostingStore::new(&config.data_file),
        config.feed_url.clone(),
    );

    let summary = pipeline.run().await?;
    println!(
        "Fetched {} entries, {} tech postings, {} new. Dataset now holds {} postings.",
        summary.fetched, summary.relevant, summary.added, summary.total
    );

    Ok(())
}

async fn report(
    config: &Config,
    report_config: &ReportConfig,
    format: &str,
    output: Option<&str>,
    ask: Option<&str>,
) -> anyhow::Result<()> {
    let vocabulary = match &config.vocabulary_path {
        Some(path) => SkillVocabulary::from_json_file(path)?,
        None => SkillVocabulary::default(),
    };

    let store = PostingStore::new(&config.data_file);
    let snapshot = store.load()?;
    if snapshot.postings.is_empty() {
        tracing::warn!(
            "No postings in {}. Run `jobtrends collect` first.",
            store.path().display()
        );
    }

    let analyzer = MarketAnalyzer::new(vocabulary)?;
    let analyzed = analyzer.annotate(snapshot.postings);
    let report = analyzer.build_report(&analyzed, snapshot.last_updated, report_config);

    let advice = match ask.map(str::trim).filter(|q| !q.is_empty()) {
        Some(question) => {
            let context = analyzer.market_context(&analyzed, report_config);
            Some((question, ask_advice(config, context, question).await))
        }
        None => None,
    };

    let rendered = match format {
        "json" => match &advice {
            Some((question, answer)) => serde_json::to_string_pretty(&serde_json::json!({
                "report": report,
                "advice": { "question": question, "answer": answer },
            }))?,
            None => serde_json::to_string_pretty(&report)?,
        },
        "markdown" => {
            let mut out = format_markdown(&report);
            if let Some((question, answer)) = &advice {
                out.push_str(&format!(
                    "\n## Career Advice\n\n> {}\n\n{}\n",
                    question, answer
                ));
            }
            out
        }
        _ => {
            let mut out = format_text(&report);
            if let Some((question, answer)) = &advice {
                out.push_str(&format!(
                    "\n=== Career Advice ===\n\nQ: {}\n\n{}\n",
                    question, answer
                ));
            }
            out
        }
    };

    if let Some(path) = output {
        std::fs::write(path, &rendered)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

/// Advice failures are reported inline so the report itself is still shown.
async fn ask_advice(config: &Config, market_context: String, question: &str) -> String {
    let provider: Box<dyn LLMProvider> = match build_provider(config) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::warn!("Advice provider unavailable: {}", e);
            return "Advice is unavailable right now. Please try again.".to_string();
        }
    };

    let request = AdviceRequest::new(question, market_context);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Asking {} for advice...", provider.name()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = provider.generate_advice(&request).await;
    spinner.finish_and_clear();

    match result {
        Ok(advice) => advice,
        Err(e) => {
            tracing::warn!("{} advice failed: {}", provider.name(), e);
            "The advice model did not answer. Please try again.".to_string()
        }
    }
}

fn build_provider(config: &Config) -> jobtrends::Result<Box<dyn LLMProvider>> {
    match config.advice_backend {
        AdviceBackend::Ollama => Ok(Box::new(OllamaProvider::new(
            config.ollama_url.clone(),
            config.ollama_model.clone(),
            config.advice_timeout,
        )?)),
        AdviceBackend::Claude => {
            let api_key = config.anthropic_api_key.clone().unwrap_or_default();
            Ok(Box::new(ClaudeProvider::new(
                api_key,
                Some(config.claude_model.clone()),
                config.advice_timeout,
            )?))
        }
    }
}

fn format_text(report: &MarketReport) -> String {
    let mut output = String::new();

    output.push_str("\n=== Remote Tech Job Market ===\n\n");
    output.push_str(&format!("Total postings: {}\n", report.total_postings));
    output.push_str(&format!("Unique companies: {}\n", report.unique_companies));
    output.push_str(&format!(
        "Hottest skill: {}\n",
        report.hottest_skill.as_deref().unwrap_or("-")
    ));
    if let Some(updated) = report.dataset_last_updated {
        output.push_str(&format!(
            "Data last updated: {}\n",
            updated.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output.push_str("\nTop Skills:\n");
    for (rank, skill) in report.top_skills.iter().enumerate() {
        output.push_str(&format!(
            "  {:>2}. {} ({}): {}\n",
            rank + 1,
            skill.skill,
            skill.category.as_deref().unwrap_or("Other"),
            skill.count
        ));
    }

    if !report.top_companies.is_empty() {
        output.push_str("\nTop Hiring Companies:\n");
        for company in &report.top_companies {
            output.push_str(&format!("  - {}: {}\n", company.company, company.count));
        }
    }

    if !report.categories.is_empty() {
        output.push_str("\nCategories:\n");
        for category in &report.categories {
            output.push_str(&format!("  - {}: {}\n", category.category, category.count));
        }
    }

    let matrix = &report.co_occurrence;
    if !matrix.is_empty() {
        output.push_str("\nSkill Co-occurrence:\n");
        let width = matrix.skills().iter().map(|s| s.len()).max().unwrap_or(0);
        let cell = width.max(matrix.max_count().to_string().len());

        output.push_str(&format!("  {:width$}", "", width = width));
        for skill in matrix.skills() {
            output.push_str(&format!(" {:>cell$}", skill, cell = cell));
        }
        output.push('\n');

        for skill in matrix.skills() {
            output.push_str(&format!("  {:width$}", skill, width = width));
            for count in matrix.row(skill) {
                output.push_str(&format!(" {:>cell$}", count, cell = cell));
            }
            output.push('\n');
        }
    }

    if !report.recent_postings.is_empty() {
        output.push_str("\nRecent Postings:\n");
        for posting in &report.recent_postings {
            let date = posting
                .published_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "----------".to_string());
            output.push_str(&format!(
                "  {} | {} | {} | {} | {}\n",
                date, posting.company, posting.title, posting.category, posting.link
            ));
        }
    }

    output.push_str(&format!(
        "\nGenerated on: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_markdown(report: &MarketReport) -> String {
    let mut output = String::new();

    output.push_str("# Remote Tech Job Market\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Total Postings | {} |\n", report.total_postings));
    output.push_str(&format!("| Unique Companies | {} |\n", report.unique_companies));
    output.push_str(&format!(
        "| Hottest Skill | {} |\n",
        report.hottest_skill.as_deref().unwrap_or("-")
    ));
    if let Some(updated) = report.dataset_last_updated {
        output.push_str(&format!(
            "| Data Last Updated | {} |\n",
            updated.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output.push_str("\n## Top Skills\n\n");
    output.push_str("| Rank | Skill | Category | Postings |\n");
    output.push_str("|------|-------|----------|----------|\n");
    for (rank, skill) in report.top_skills.iter().enumerate() {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            rank + 1,
            skill.skill,
            skill.category.as_deref().unwrap_or("Other"),
            skill.count
        ));
    }

    if !report.top_companies.is_empty() {
        output.push_str("\n## Top Hiring Companies\n\n");
        output.push_str("| Company | Postings |\n|---------|----------|\n");
        for company in &report.top_companies {
            output.push_str(&format!("| {} | {} |\n", company.company, company.count));
        }
    }

    let matrix = &report.co_occurrence;
    if !matrix.is_empty() {
        output.push_str("\n## Skill Co-occurrence\n\n");
        output.push_str("| |");
        for skill in matrix.skills() {
            output.push_str(&format!(" {} |", skill));
        }
        output.push_str("\n|---|");
        for _ in matrix.skills() {
            output.push_str("---|");
        }
        output.push('\n');
        for skill in matrix.skills() {
            output.push_str(&format!("| **{}** |", skill));
            for count in matrix.row(skill) {
                output.push_str(&format!(" {} |", count));
            }
            output.push('\n');
        }
    }

    if !report.recent_postings.is_empty() {
        output.push_str("\n## Recent Postings\n\n");
        output.push_str("| Date | Company | Title | Category |\n");
        output.push_str("|------|---------|-------|----------|\n");
        for posting in &report.recent_postings {
            let date = posting
                .published_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            output.push_str(&format!(
                "| {} | {} | [{}]({}) | {} |\n",
                date, posting.company, posting.title, posting.link, posting.category
            ));
        }
    }

    output.push_str(&format!(
        "\n---\n*Generated on {}*\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
