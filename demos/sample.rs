//! Sample bot with two extra commands.
//!
//! Run with: SPARK_BOT_APP_NAME=... SPARK_BOT_TOKEN=... SPARK_BOT_EMAIL=... \
//!   SPARK_BOT_URL=... cargo run --example sample

use spark_bot::{Config, Message, Reply, SparkBot};

const DEMO_IMAGE: &str =
    "https://sayingimages.com/wp-content/uploads/aaaaaalll-righty-then-alrighty-meme.jpg";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,spark_bot=debug")),
        )
        .init();

    let bot = match Config::load_env().map_err(Into::into).and_then(SparkBot::new) {
        Ok(bot) => bot,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    bot.add_command("/dosomething", "help for do something", |msg: &Message| {
        Ok(Reply::text(format!("i did what you said - {}", msg.text)))
    });
    bot.add_command("/demo", "sample that returns a file", |_: &Message| {
        Ok(Reply::default().with_file(DEMO_IMAGE))
    });

    if let Err(e) = bot.run().await {
        tracing::error!("Bot stopped: {}", e);
        std::process::exit(1);
    }
}
