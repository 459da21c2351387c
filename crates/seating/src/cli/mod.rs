//! Command-line definition
//!
//! Built with the clap builder API. `generate` and `preview` share the layout
//! parameter flags from [`layout_args`].

pub mod handlers;
pub mod params;

use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("seating")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Banquet seating chart layout generator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .help("Load engine configuration from FILE instead of the global/project files"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log every pipeline step"),
        )
        .subcommand(cmd_generate())
        .subcommand(cmd_preview())
        .subcommand(cmd_lookup())
}

fn cmd_generate() -> Command {
    Command::new("generate")
        .about("Compute a layout and overwrite the table_locations artifact")
        .args(layout_args())
        .arg(output_arg())
        .arg(
            Arg::new("display-names")
                .long("display-names")
                .value_name("FILE")
                .help("JSON object of id -> display name to attach to entities"),
        )
        .arg(
            Arg::new("preview")
                .long("preview")
                .action(ArgAction::SetTrue)
                .help("Also print a text drawing of the grid"),
        )
        .arg(json_arg())
        .after_help(
            "EXAMPLES:\n  \
             # Default layout: TOP stage, 5 x 8 guest area\n  \
             seating generate\n\
             \n  \
             # Head table two wide, one row gap, left stage\n  \
             seating generate --stage-location LEFT --head-table 2x1 --ht-gap 1\n\
             \n  \
             # Keep two cells free and stagger the first column\n  \
             seating generate --block 0,0 --block 4,0 --stagger 1",
        )
}

fn cmd_preview() -> Command {
    Command::new("preview")
        .about("Compute a layout and print it without touching the artifact")
        .args(layout_args())
        .arg(json_arg())
}

fn cmd_lookup() -> Command {
    Command::new("lookup")
        .about("Show where an entity or a guest sits in the current artifact")
        .arg(
            Arg::new("id")
                .required_unless_present("name")
                .conflicts_with("name")
                .value_name("ID")
                .help("Entity id, e.g. T12 or HeadTable_1_6"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .value_name("NAME")
                .requires("guests")
                .help("Guest name, optionally as 'name (category)'"),
        )
        .arg(
            Arg::new("guests")
                .long("guests")
                .value_name("FILE")
                .requires("name")
                .help("JSON list of guests with name, category and seat"),
        )
        .arg(
            Arg::new("choice")
                .long("choice")
                .value_name("REPLY")
                .requires("name")
                .help("Answer to an ambiguous name: option number, category or 'name (category)'"),
        )
        .arg(output_arg().help("Artifact to read (defaults to the configured path)"))
        .arg(json_arg())
        .after_help(
            "EXAMPLES:\n  \
             # Where is table 12?\n  \
             seating lookup T12\n\
             \n  \
             # Where does a guest sit?\n  \
             seating lookup --guests guests.json --name 'Alex'\n\
             \n  \
             # Two guests named Alex: pick the one from work\n  \
             seating lookup --guests guests.json --name 'Alex' --choice work",
        )
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .value_name("FILE")
        .help("Artifact path (defaults to the configured artifact_path)")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON for machine parsing")
}

/// Flags that assemble `LayoutParameters`
pub fn layout_args() -> Vec<Arg> {
    vec![
        Arg::new("params")
            .long("params")
            .value_name("FILE")
            .help("Parameter file (.json or .toml); flags override its values"),
        Arg::new("stage-location")
            .long("stage-location")
            .value_name("SIDE")
            .help("TOP, BOTTOM, LEFT or RIGHT"),
        Arg::new("stage-width")
            .long("stage-width")
            .value_name("N")
            .value_parser(value_parser!(u32))
            .help("Stage front width in cells"),
        Arg::new("stage-alignment")
            .long("stage-alignment")
            .value_name("ALIGN")
            .help("LEFT, RIGHT, CENTER_LEAN_LOW or CENTER_LEAN_HIGH"),
        Arg::new("depth")
            .long("depth")
            .value_name("N")
            .value_parser(value_parser!(u32))
            .help("Guest area depth (away from the stage)"),
        Arg::new("width")
            .long("width")
            .value_name("N")
            .value_parser(value_parser!(u32))
            .help("Guest area width (along the stage)"),
        Arg::new("axis")
            .long("axis")
            .value_name("AXIS")
            .help("TOWARDS_STAGE or PARALLEL_TO_STAGE"),
        Arg::new("corner")
            .long("corner")
            .value_name("CORNER")
            .help("FRONT_LEFT, FRONT_RIGHT, BACK_LEFT or BACK_RIGHT"),
        Arg::new("head-table")
            .long("head-table")
            .value_name("WxD")
            .help("Enable a head table of WIDTH x DEPTH cells, e.g. 2x1"),
        Arg::new("no-head-table")
            .long("no-head-table")
            .action(ArgAction::SetTrue)
            .conflicts_with("head-table")
            .help("Disable any head table from the parameter file or config"),
        Arg::new("ht-alignment")
            .long("ht-alignment")
            .value_name("ALIGN")
            .help("Head table alignment along the stage"),
        Arg::new("ht-gap")
            .long("ht-gap")
            .value_name("N")
            .value_parser(value_parser!(u32))
            .help("Rows kept free between stage and head table"),
        Arg::new("ht-row")
            .long("ht-row")
            .value_name("N")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i32))
            .help("Row after the gap (0 = first; negative moves into the gap)"),
        Arg::new("ht-block-leading")
            .long("ht-block-leading")
            .action(ArgAction::SetTrue)
            .help("Block the rows between the gap and the head table"),
        Arg::new("ht-block-behind")
            .long("ht-block-behind")
            .action(ArgAction::SetTrue)
            .help("Block every cell behind the head table"),
        Arg::new("block")
            .long("block")
            .value_name("X,Y")
            .action(ArgAction::Append)
            .help("Reserve cell X,Y (repeatable)"),
        Arg::new("blocks-json")
            .long("blocks-json")
            .value_name("JSON")
            .help("Reservations as JSON, e.g. '[[0,0],[4,0]]'"),
        Arg::new("stagger")
            .long("stagger")
            .value_name("N")
            .action(ArgAction::Append)
            .value_parser(value_parser!(u32).range(1..))
            .help("Render visual column N half a cell deeper (repeatable)"),
        Arg::new("stagger-json")
            .long("stagger-json")
            .value_name("JSON")
            .help("Staggered columns as JSON, e.g. '[1,3]'"),
    ]
}
