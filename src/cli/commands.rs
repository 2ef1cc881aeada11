//! Command dispatch for the diagnostic CLI

use std::collections::HashMap;
use std::io;

use clap::CommandFactory;
use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, LayoutArgs, ModeArg};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{
    build_graph, calculate_graph_bounds, center_graph, filter_graph_by_depth,
    filter_graph_by_lineage, validate_graph, DomainError, Graph, Person, TreeData, TreeQuery,
    Union,
};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::TreeSource;
use crate::util::path::expand_path;

const DEFAULT_WINDOW_DEPTH: usize = 2;

pub async fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config_path().as_deref())?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Build { file } => cmd_build(&container, file),
        Commands::Validate { file } => cmd_validate(&container, file),
        Commands::Filter {
            file,
            proband,
            depth,
            lineage,
        } => cmd_filter(&container, file, proband, *depth, *lineage),
        Commands::Layout { layout, center } => cmd_layout(&container, layout, *center).await,
        Commands::Bounds { layout } => cmd_bounds(&container, layout).await,
        Commands::Tree {
            file,
            proband,
            mode,
            depth,
        } => cmd_tree(&container, file, proband, *mode, *depth),
        Commands::Config { command } => cmd_config(cli, &container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn load_data(container: &ServiceContainer, file: &str) -> CliResult<TreeData> {
    let source = container.json_source(&expand_path(file));
    let data = source.load()?;
    debug!(
        "load_data: {} persons, {} unions from {}",
        data.persons.len(),
        data.unions.len(),
        source.path().display()
    );
    Ok(data)
}

fn print_json(value: &impl serde::Serialize) -> CliResult<()> {
    output::info(&serde_json::to_string_pretty(value)?);
    Ok(())
}

fn require_person(graph: &Graph, proband: &str) -> CliResult<()> {
    match graph.node(proband) {
        Some(node) if node.is_person() => Ok(()),
        _ => Err(DomainError::UnknownProband(proband.to_string()).into()),
    }
}

#[instrument(skip(container))]
fn cmd_build(container: &ServiceContainer, file: &str) -> CliResult<()> {
    let graph = build_graph(&load_data(container, file)?);
    print_json(&graph)
}

#[instrument(skip(container))]
fn cmd_validate(container: &ServiceContainer, file: &str) -> CliResult<()> {
    let graph = build_graph(&load_data(container, file)?);
    let report = validate_graph(&graph.nodes, &graph.edges);
    if report.valid {
        output::success(&format!(
            "{} nodes, {} edges, every edge resolves",
            graph.nodes.len(),
            graph.edges.len()
        ));
        return Ok(());
    }
    output::header(&format!("{} problem(s):", report.errors.len()));
    for message in &report.errors {
        output::failure(message);
    }
    report.into_result()?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_filter(
    container: &ServiceContainer,
    file: &str,
    proband: &str,
    depth: usize,
    lineage: Option<ModeArg>,
) -> CliResult<()> {
    let graph = build_graph(&load_data(container, file)?);
    require_person(&graph, proband)?;
    let filtered = match lineage {
        Some(mode) => {
            let query = TreeQuery {
                proband_id: proband.to_string(),
                mode: mode.into(),
                depth,
            };
            filter_graph_by_lineage(&graph.nodes, &graph.edges, &query)
        }
        None => filter_graph_by_depth(&graph.nodes, &graph.edges, proband, depth),
    };
    print_json(&filtered)
}

/// Build, optionally window, and lay out the graph described by `args`.
async fn laid_out_graph(container: &ServiceContainer, args: &LayoutArgs) -> CliResult<Graph> {
    let mut graph = build_graph(&load_data(container, &args.file)?);
    if let Some(proband) = &args.proband {
        require_person(&graph, proband)?;
        let depth = args.depth.unwrap_or(DEFAULT_WINDOW_DEPTH);
        graph = filter_graph_by_depth(&graph.nodes, &graph.edges, proband, depth);
    }

    let mut options = container.settings.layout;
    if let Some(direction) = args.direction {
        options.direction = direction.into();
    }
    if let Some(routing) = args.routing {
        options.edge_routing = routing.into();
    }

    let nodes = container
        .layout_service()
        .apply_layout(&graph.nodes, &graph.edges, Some(options))
        .await;
    Ok(Graph::new(nodes, graph.edges))
}

#[instrument(skip(container))]
async fn cmd_layout(container: &ServiceContainer, args: &LayoutArgs, center: bool) -> CliResult<()> {
    let mut graph = laid_out_graph(container, args).await?;
    if center {
        graph.nodes = center_graph(&graph.nodes, &container.settings.sizing);
    }
    print_json(&graph)
}

#[instrument(skip(container))]
async fn cmd_bounds(container: &ServiceContainer, args: &LayoutArgs) -> CliResult<()> {
    let graph = laid_out_graph(container, args).await?;
    let bounds = calculate_graph_bounds(&graph.nodes, &container.settings.sizing);
    output::field("min", &format!("({}, {})", bounds.min_x, bounds.min_y));
    output::field("max", &format!("({}, {})", bounds.max_x, bounds.max_y));
    output::field("size", &format!("{} x {}", bounds.width, bounds.height));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(
    container: &ServiceContainer,
    file: &str,
    proband: &str,
    mode: ModeArg,
    depth: usize,
) -> CliResult<()> {
    let data = load_data(container, file)?;
    let kin = Kinship::new(&data);
    if !kin.persons.contains_key(proband) {
        return Err(DomainError::UnknownProband(proband.to_string()).into());
    }
    match mode {
        ModeArg::Ancestors => output::info(&kin.ancestors(proband, depth)),
        ModeArg::Descendants => output::info(&kin.descendants(proband, depth)),
        ModeArg::Hourglass => {
            output::header("Ancestors");
            output::info(&kin.ancestors(proband, depth));
            output::header("Descendants");
            output::info(&kin.descendants(proband, depth));
        }
    }
    Ok(())
}

fn cmd_config(cli: &Cli, container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".to_string());
            let local = cli
                .config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string());
            output::field("global", &global);
            output::field("local", &local);
        }
    }
    Ok(())
}

/// Relational lookups for rendering lineage as text.
struct Kinship<'a> {
    persons: HashMap<&'a str, &'a Person>,
    unions_of: HashMap<&'a str, Vec<&'a Union>>,
    children_of_union: HashMap<&'a str, Vec<&'a str>>,
    parent_unions: HashMap<&'a str, Vec<&'a Union>>,
    direct_children: HashMap<&'a str, Vec<&'a str>>,
    direct_parents: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Kinship<'a> {
    fn new(data: &'a TreeData) -> Self {
        let persons = data.persons.iter().map(|p| (p.id.as_str(), p)).collect();
        let unions_by_id: HashMap<&str, &Union> =
            data.unions.iter().map(|u| (u.union_id.as_str(), u)).collect();

        let mut unions_of: HashMap<&str, Vec<&Union>> = HashMap::new();
        for union in &data.unions {
            for partner in union.partners() {
                unions_of.entry(partner).or_default().push(union);
            }
        }

        let mut children_of_union: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut parent_unions: HashMap<&str, Vec<&Union>> = HashMap::new();
        for link in &data.union_children {
            children_of_union
                .entry(link.union_id.as_str())
                .or_default()
                .push(link.child_id.as_str());
            if let Some(union) = unions_by_id.get(link.union_id.as_str()) {
                parent_unions.entry(link.child_id.as_str()).or_default().push(union);
            }
        }

        let mut direct_children: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut direct_parents: HashMap<&str, Vec<&str>> = HashMap::new();
        for link in &data.parent_child {
            direct_children
                .entry(link.parent_id.as_str())
                .or_default()
                .push(link.child_id.as_str());
            direct_parents
                .entry(link.child_id.as_str())
                .or_default()
                .push(link.parent_id.as_str());
        }

        Self {
            persons,
            unions_of,
            children_of_union,
            parent_unions,
            direct_children,
            direct_parents,
        }
    }

    fn label(&self, id: &str) -> String {
        let Some(person) = self.persons.get(id) else {
            return format!("{} (unknown)", id);
        };
        let years = match (person.birth_date, person.death_date) {
            (Some(b), Some(d)) => format!(" {}-{}", b.format("%Y"), d.format("%Y")),
            (Some(b), None) => format!(" b. {}", b.format("%Y")),
            (None, Some(d)) => format!(" d. {}", d.format("%Y")),
            (None, None) => String::new(),
        };
        format!("{} [{}]{}", person.display_name(), id, years)
    }

    fn descendants(&self, id: &str, depth: usize) -> Tree<String> {
        let mut tree = Tree::new(self.label(id));
        if depth == 0 {
            return tree;
        }

        let mut via_union: Vec<&str> = Vec::new();
        for union in self.unions_of.get(id).into_iter().flatten() {
            let partner = union.partners().find(|p| *p != id);
            let heading = match partner {
                Some(p) => format!("⚭ {}", self.label(p)),
                None => "⚭ (no partner)".to_string(),
            };
            let children = self
                .children_of_union
                .get(union.union_id.as_str())
                .into_iter()
                .flatten()
                .copied();
            via_union.extend(children.clone());
            tree.push(Tree::new(heading).with_leaves(children.map(|c| self.descendants(c, depth - 1))));
        }

        let direct = self
            .direct_children
            .get(id)
            .into_iter()
            .flatten()
            .copied()
            .filter(|c| !via_union.contains(c))
            .unique();
        for child in direct {
            tree.push(self.descendants(child, depth - 1));
        }
        tree
    }

    fn ancestors(&self, id: &str, depth: usize) -> Tree<String> {
        let mut tree = Tree::new(self.label(id));
        if depth == 0 {
            return tree;
        }
        let from_unions = self
            .parent_unions
            .get(id)
            .into_iter()
            .flatten()
            .copied()
            .flat_map(Union::partners);
        let direct = self.direct_parents.get(id).into_iter().flatten().copied();
        for parent in from_unions.chain(direct).unique() {
            tree.push(self.ancestors(parent, depth - 1));
        }
        tree
    }
}
