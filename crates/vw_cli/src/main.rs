use clap::{Parser, Subcommand};
use tracing::info;

use vw_core::{config, Article};
use vw_generation::{generate_articles, GenerationClient, HttpBackend, SamplingParams};
use vw_news::{HeadlineQuery, NewsClient};

#[derive(Parser, Debug)]
#[command(author, version, about = "News in a famous person's voice", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate articles written in the given person's voice
    Generate {
        /// The person whose voice to write in (e.g. "Albert Einstein")
        person: String,
        #[arg(long, default_value = "gpt-4o-mini")]
        model: String,
        #[arg(long, default_value_t = 0.7)]
        temperature: f32,
        #[arg(long, default_value_t = 2000)]
        max_tokens: u32,
        /// Also render the full perspective text for each article
        #[arg(long)]
        full: bool,
    },
    /// Fetch current headlines from the news vendor
    Headlines {
        #[arg(long, default_value = "news")]
        topic: String,
        #[arg(long, default_value = "general")]
        section: String,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long, default_value = "us")]
        country: String,
        #[arg(long, default_value = "en")]
        lang: String,
    },
    /// List the persona voices with a dedicated template
    Personas,
}

fn print_article(article: &Article) {
    println!("[{}] {}", article.id, article.title);
    if !article.original_title.is_empty() {
        println!("    original: {}", article.original_title);
    }
    if !article.summary.is_empty() {
        println!("    {}", article.summary);
    }
    println!("    {} | {}", article.source, article.published_at);
    if !article.original_url.is_empty() {
        println!("    {}", article.original_url);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    config::load_dotenv();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            person,
            model,
            temperature,
            max_tokens,
            full,
        } => {
            let api_key = config::generation_api_key()?;
            let client = GenerationClient::new(HttpBackend::new(api_key)?);
            let params = SamplingParams {
                temperature,
                max_tokens,
                ..SamplingParams::default()
            };

            info!("Generating articles in the voice of {person} (model: {model})");
            let articles = generate_articles(&client, &person, &model, &params).await?;
            info!("Generated {} article(s)", articles.len());

            for article in &articles {
                print_article(article);
                println!();
            }

            if full {
                for article in &articles {
                    println!("{}", "=".repeat(72));
                    println!(
                        "{}",
                        vw_persona::render(&person, &article.title, &article.summary)
                    );
                    println!();
                }
            }
        }
        Commands::Headlines {
            topic,
            section,
            limit,
            country,
            lang,
        } => {
            let api_key = config::news_api_key()?;
            let client = NewsClient::new(api_key)?;
            let query = HeadlineQuery {
                topic,
                section,
                limit,
                country,
                lang,
            };

            let articles = client.top_headlines(&query).await;
            if articles.is_empty() {
                println!("No headlines available right now.");
            }
            for article in &articles {
                print_article(article);
                println!();
            }
        }
        Commands::Personas => {
            println!("Personas with a dedicated voice:");
            for name in vw_persona::persona_names() {
                println!("  - {name}");
            }
            println!("Any other name falls back to a generic voice.");
        }
    }

    Ok(())
}
