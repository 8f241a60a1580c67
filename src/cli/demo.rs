//! Demo command: run one callback-style loader

use clap::{Args, ValueEnum};

use super::{Cli, CliError};
use crate::loader::callback::{
    execute_nested_load, load_all_at_once, load_three_all_at_once, load_three_nested,
};

/// Callback-style loader to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoPattern {
    /// Three fetches, each after the previous one
    NestedThree,
    /// `--count` fetches in a row, stopping at the first failure
    Nested,
    /// `--count` fetches at once, completion tracked by a done counter
    AllAtOnce,
    /// Three fetches at once
    AllAtOnceThree,
}

/// Arguments of the demo command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DemoArgs {
    /// Loader to run
    #[arg(value_enum)]
    pub pattern: DemoPattern,

    /// Number of fetches for the `nested` and `all-at-once` patterns
    #[arg(long, default_value_t = 50)]
    pub count: usize,
}

impl DemoArgs {
    /// Run the selected loader and print how long it took
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        let fetcher = cli.build_fetcher()?;
        let user_id = cli.user_id;

        match self.pattern {
            DemoPattern::NestedThree => {
                let elapsed = load_three_nested(&*fetcher, user_id).await;
                println!("nested-three: {:.3} sec", elapsed.as_secs_f64());
            }
            DemoPattern::Nested => {
                let run = execute_nested_load(&*fetcher, user_id, self.count).await;
                println!(
                    "nested x{}: {:.3} sec (failed: {})",
                    self.count,
                    run.elapsed_secs(),
                    run.value
                );
            }
            DemoPattern::AllAtOnce => {
                let reported = load_all_at_once(&*fetcher, user_id, self.count).await;
                print_reported("all-at-once", self.count, reported);
            }
            DemoPattern::AllAtOnceThree => {
                let reported = load_three_all_at_once(&*fetcher, user_id).await;
                print_reported("all-at-once", 3, reported);
            }
        }
        Ok(())
    }
}

fn print_reported(name: &str, count: usize, reported: Option<std::time::Duration>) {
    match reported {
        Some(elapsed) => println!("{name} x{count}: {:.3} sec", elapsed.as_secs_f64()),
        None => println!("{name} x{count}: completion never reported"),
    }
}
