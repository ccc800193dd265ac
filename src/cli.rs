use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use taskdeck::board::GroupBy;
use taskdeck::task::{Priority, Status};

#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(about = "A terminal Kanban board backed by a remote task service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a task without opening the board
    Add {
        name: String,

        #[arg(short, long, default_value = "todo")]
        status: Status,

        #[arg(short, long, default_value = "low")]
        priority: Priority,

        /// Due date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        due: Option<NaiveDate>,

        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Image URL attached to the task
        #[arg(short, long)]
        image: Option<String>,
    },
    /// Print the board to stdout
    Show {
        /// Column grouping: state, priority or date
        #[arg(short, long, default_value = "state")]
        group_by: GroupBy,

        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        status: Option<Status>,

        #[arg(long)]
        priority: Option<Priority>,

        /// Exact due-date match (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Column page (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
}
