use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use vaquita::render::{Pipeline, PipelineError};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Stage(vaquita::Error),
    Pipeline(PipelineError),
    Json(serde_json::Error),
    Tool(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Stage(err) => write!(f, "{err}"),
            CliError::Pipeline(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Tool(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<vaquita::Error> for CliError {
    fn from(value: vaquita::Error) -> Self {
        Self::Stage(value)
    }
}

impl From<PipelineError> for CliError {
    fn from(value: PipelineError) -> Self {
        Self::Pipeline(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Parse,
    Layout,
    Arrange,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    tools_dir: Option<String>,
    work_dir: Option<String>,
    keep_work_dir: bool,
}

fn usage() -> &'static str {
    "vaquita-cli\n\
\n\
USAGE:\n\
  vaquita-cli [parse] [--pretty] [<path>|-]\n\
  vaquita-cli layout [--pretty] [--tools-dir <dir>] [--work-dir <dir>] [--keep-work-dir] [<path>|-]\n\
  vaquita-cli arrange [--pretty] [--tools-dir <dir>] [--work-dir <dir>] [--keep-work-dir] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - parse prints the original graph model as JSON without running any tool.\n\
  - layout drives decomposer, planarizer, biconnected_embedding_finder and\n\
    vis_rep_finder, then prints the synthesized drawing as JSON.\n\
  - arrange drives digraph_arranger and prints ranked node positions as JSON.\n\
  - External tools are looked up on PATH unless --tools-dir is given.\n\
  - Stage files go under the work directory (default ./vaquita_layout_tmp or\n\
    ./vaquita_arrange_tmp) and are removed afterwards unless --keep-work-dir\n\
    is given.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "parse" => args.command = Command::Parse,
            "layout" => args.command = Command::Layout,
            "arrange" => args.command = Command::Arrange,
            "--pretty" => args.pretty = true,
            "--keep-work-dir" => args.keep_work_dir = true,
            "--tools-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.tools_dir = Some(dir.clone());
            }
            "--work-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.work_dir = Some(dir.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                while it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

/// Holds the stage files exchanged with the external tools for one run.
/// Removed on drop unless the run asked to keep it for inspection.
struct WorkDir {
    root: PathBuf,
    keep: bool,
}

impl WorkDir {
    fn create(root: &str, keep: bool) -> Result<Self, CliError> {
        let root = PathBuf::from(root);
        std::fs::create_dir_all(&root)?;
        Ok(Self { root, keep })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if !self.keep {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }
}

/// Invokes one external tool as `<tool> <input> <output>`.
fn run_tool(
    tools_dir: Option<&str>,
    tool: &str,
    input: &Path,
    output: &Path,
) -> Result<(), CliError> {
    let program = match tools_dir {
        Some(dir) => Path::new(dir).join(tool).into_os_string(),
        None => std::ffi::OsString::from(tool),
    };
    let status = std::process::Command::new(&program)
        .arg(input)
        .arg(output)
        .status()
        .map_err(|e| CliError::Tool(format!("{tool}: failed to spawn process: {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(CliError::Tool(format!("{tool}: exited with {status}")))
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;

    match args.command {
        Command::Parse => {
            let graph = vaquita::stage::original::parse(&text)?;
            let out = serde_json::json!({
                "topNode": graph.top_node,
                "gaps": graph.gaps,
                "nodes": graph.nodes.values().collect::<Vec<_>>(),
                "edges": graph.edges.values().collect::<Vec<_>>(),
            });
            write_json(&out, args.pretty)
        }
        Command::Layout => {
            let mut pipeline = Pipeline::new(&text)?;
            let work = WorkDir::create(
                args.work_dir.as_deref().unwrap_or("./vaquita_layout_tmp"),
                args.keep_work_dir,
            )?;
            let tools = args.tools_dir.as_deref();

            let decomp_input = work.path("decomp_input.txt");
            let decomp_output = work.path("decomp_output.txt");
            std::fs::write(&decomp_input, pipeline.decomposition_input())?;
            run_tool(tools, "decomposer", &decomp_input, &decomp_output)?;
            pipeline.ingest_decomposition(&std::fs::read_to_string(&decomp_output)?)?;

            for block in pipeline.block_keys() {
                let unplanarized = work.path(&format!("unplanarized_{block}.txt"));
                let planarized = work.path(&format!("planarized_{block}.txt"));
                std::fs::write(&unplanarized, pipeline.planarization_input(block)?)?;
                run_tool(tools, "planarizer", &unplanarized, &planarized)?;
                pipeline.ingest_planarized(block, &std::fs::read_to_string(&planarized)?)?;

                let embedding_input = work.path(&format!("embedding_input_{block}.txt"));
                let embedding_output = work.path(&format!("embedding_output_{block}.txt"));
                std::fs::write(&embedding_input, pipeline.embedding_input(block)?)?;
                run_tool(
                    tools,
                    "biconnected_embedding_finder",
                    &embedding_input,
                    &embedding_output,
                )?;
                pipeline.ingest_embedding(block, &std::fs::read_to_string(&embedding_output)?)?;
            }

            let vis_input = work.path("vis_rep_input.txt");
            let vis_output = work.path("vis_rep_output.txt");
            std::fs::write(&vis_input, pipeline.vis_rep_input()?)?;
            run_tool(tools, "vis_rep_finder", &vis_input, &vis_output)?;
            let drawing = pipeline.drawing(&std::fs::read_to_string(&vis_output)?)?;

            write_json(&drawing, args.pretty)
        }
        Command::Arrange => {
            let work = WorkDir::create(
                args.work_dir.as_deref().unwrap_or("./vaquita_arrange_tmp"),
                args.keep_work_dir,
            )?;
            let tools = args.tools_dir.as_deref();

            let arranger_input = work.path("digraph_input.txt");
            let arranger_output = work.path("arranged.txt");
            std::fs::write(&arranger_input, &text)?;
            run_tool(tools, "digraph_arranger", &arranger_input, &arranger_output)?;

            let mut layout =
                vaquita::stage::ranked::parse(&std::fs::read_to_string(&arranger_output)?)?;
            layout.assign_ranks_and_pos()?;
            write_json(&layout, args.pretty)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
