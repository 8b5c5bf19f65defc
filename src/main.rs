use anyhow::{bail, Context, Result};
use log::info;
use std::env;
use std::fs;

use mealplan::config::AppConfig;
use mealplan::recipe_parser::parse_recipe_text;
use mealplan::services::{households, recipes, shopping};
use mealplan::sqlite_store::SqliteStore;

const USAGE: &str = "Usage: mealplan <command>
  init-user <uid> <email> [name]          Create a user and their household
  import <household-id> <user-id> <file>  Bulk-import recipes from a text file
  shopping <household-id> <user-id> <plan-id>  Generate a shopping list";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;

    info!("Opening database at: {}", config.database_url);
    let store = SqliteStore::connect(&config.database_url).await?;

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("init-user") => {
            let [_, uid, email, rest @ ..] = args.as_slice() else {
                bail!("init-user requires <uid> <email> [name]\n\n{USAGE}");
            };
            let name = rest.first().map(String::as_str);
            let profile = households::initialize_user(&store, uid, email, name).await?;
            let household = profile
                .household
                .map(|h| h.name)
                .unwrap_or_else(|| "(no household)".to_string());
            println!("User {} belongs to {}", profile.user.name, household);
        }
        Some("import") => {
            let [_, household_id, user_id, file] = args.as_slice() else {
                bail!("import requires <household-id> <user-id> <file>\n\n{USAGE}");
            };
            let text = fs::read_to_string(file)
                .with_context(|| format!("Failed to read recipe file: {file}"))?;

            let drafts = parse_recipe_text(&text);
            if drafts.is_empty() {
                bail!("No parseable recipes found in {file}");
            }

            for draft in drafts {
                let recipe = recipes::create_recipe(&store, household_id, user_id, draft).await?;
                println!(
                    "Imported '{}' ({} ingredients, {} steps)",
                    recipe.title,
                    recipe.ingredients.len(),
                    recipe.directions.len()
                );
            }
        }
        Some("shopping") => {
            let [_, household_id, user_id, plan_id] = args.as_slice() else {
                bail!("shopping requires <household-id> <user-id> <plan-id>\n\n{USAGE}");
            };
            let list =
                shopping::generate_from_weekly_plan(&store, household_id, user_id, plan_id).await?;
            println!("Shopping list {} ({} items):", list.id, list.items.len());
            for item in &list.items {
                println!(
                    "  [{}] {} - {} (from {})",
                    item.category,
                    item.ingredient,
                    item.total_amount,
                    item.recipes.join(", ")
                );
            }
        }
        _ => bail!("{USAGE}"),
    }

    Ok(())
}
