use clap::Args;

use super::{open_planner, CmdResult};

#[derive(Args)]
pub struct MoodArgs {
    /// How you feel, in your own words
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: MoodArgs, api_url: Option<&str>) -> CmdResult {
    let (planner, _) = open_planner(api_url)?;
    let mood = planner.check_in(&args.text.join(" ")).await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&mood)?);
    } else {
        println!("{mood}");
    }
    Ok(())
}
