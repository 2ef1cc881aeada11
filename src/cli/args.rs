//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::TreeMode;
use crate::infrastructure::{Direction, EdgeRouting};

/// Family tree graphs: build, validate, filter and lay out relational tree data
#[derive(Parser, Debug)]
#[command(name = "famgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug verbosity, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Extra config file layered over the global one
    #[arg(short, long, global = true, env = "FAMGRAPH_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the node/edge graph from tree data and print it as JSON
    Build {
        /// Tree data JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,
    },

    /// Check that every edge references an existing node
    Validate {
        /// Tree data JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,
    },

    /// Print the subgraph around a proband
    Filter {
        /// Tree data JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,
        /// Person to center on
        #[arg(short, long)]
        proband: String,
        /// Maximum distance (hops, or generations with --lineage)
        #[arg(long, default_value_t = 2)]
        depth: usize,
        /// Follow lineage direction instead of plain hop distance
        #[arg(long, value_enum)]
        lineage: Option<ModeArg>,
    },

    /// Lay out the graph and print positioned nodes as JSON
    Layout {
        #[command(flatten)]
        layout: LayoutArgs,
        /// Translate the result so its bounding box is centred on the origin
        #[arg(long)]
        center: bool,
    },

    /// Lay out the graph and print its bounding box
    Bounds {
        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show ancestors or descendants of a person as a text tree
    Tree {
        /// Tree data JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,
        /// Person at the root of the tree
        #[arg(short, long)]
        proband: String,
        /// Which direction to walk
        #[arg(short, long, value_enum, default_value_t = ModeArg::Descendants)]
        mode: ModeArg,
        /// Generations to show
        #[arg(long, default_value_t = 3)]
        depth: usize,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Input and overrides shared by `layout` and `bounds`.
#[derive(clap::Args, Debug)]
pub struct LayoutArgs {
    /// Tree data JSON file
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: String,
    /// Restrict to the depth window around this person first
    #[arg(short, long)]
    pub proband: Option<String>,
    /// Depth window size in hops, default 2 (requires --proband)
    #[arg(long, requires = "proband")]
    pub depth: Option<usize>,
    /// Override the configured layout direction
    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,
    /// Override the configured edge routing
    #[arg(long, value_enum)]
    pub routing: Option<RoutingArg>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Ancestors,
    Descendants,
    Hourglass,
}

impl From<ModeArg> for TreeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Ancestors => TreeMode::Ancestors,
            ModeArg::Descendants => TreeMode::Descendants,
            ModeArg::Hourglass => TreeMode::Hourglass,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    Down,
    Up,
    Right,
    Left,
}

impl From<DirectionArg> for Direction {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Down => Direction::Down,
            DirectionArg::Up => Direction::Up,
            DirectionArg::Right => Direction::Right,
            DirectionArg::Left => Direction::Left,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingArg {
    Orthogonal,
    Polyline,
    Straight,
}

impl From<RoutingArg> for EdgeRouting {
    fn from(routing: RoutingArg) -> Self {
        match routing {
            RoutingArg::Orthogonal => EdgeRouting::Orthogonal,
            RoutingArg::Polyline => EdgeRouting::Polyline,
            RoutingArg::Straight => EdgeRouting::Straight,
        }
    }
}

impl Cli {
    /// Local config path with `~` and env vars expanded.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.as_deref().map(crate::util::path::expand_path)
    }
}
