//! Normal course executable entry point.
//!
//! # Architecture
//!
//! The execution consists of:
//!
//!     - Session and logging initialisation
//!     - Parameter loading
//!     - Normal course run:
//!         - PID file loading and validation
//!         - Segment execution, one segment at a time
//!
//! The hardware is replaced by the `SimController`, which logs and archives
//! each segment it is asked to trace.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod sim_controller;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{Report, eyre::WrapErr};
use log::info;
use structopt::StructOpt;

// Internal
use course_lib::normal_course::{NormalCourse, Params};
use sim_controller::SimController;
use util::{
    logger::{logger_init, LevelFilter},
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line options.
#[derive(Debug, StructOpt)]
#[structopt(name = "course_exec", about = "Run the normal course from its PID parameter file")]
struct Opts {
    /// Trace the right edge of the line rather than the left
    #[structopt(long)]
    right: bool,

    /// Target colour sensor brightness
    #[structopt(long, default_value = "90")]
    target_brightness: i32,

    /// Parameter file, relative to the params directory
    #[structopt(long, default_value = "normal_course.toml")]
    params: String,

    /// Only log normal course progress at info level and above
    #[structopt(long)]
    quiet: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "course_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    let module_levels: &[(&'static str, LevelFilter)] = if opts.quiet {
        &[("course_lib::normal_course", LevelFilter::Info)]
    }
    else {
        &[]
    };
    logger_init(LevelFilter::Trace, module_levels, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Normal Course Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    info!("Options: {:?}", opts);

    // ---- LOAD PARAMETERS ----

    let nc_params: Params = params::load::<Params>(&opts.params)
        .wrap_err("Could not load normal course params")?
        .with_pid_dir(params::params_path("")?);

    info!("Normal course parameters loaded");

    // ---- INITIALISE CONTROLLER ----

    let mut controller = SimController::new(&session)
        .wrap_err("Failed to initialise the simulated controller")?;

    // ---- RUN ----

    let mut normal_course = NormalCourse::with_params(
        &mut controller,
        !opts.right,
        opts.target_brightness,
        nc_params
    );

    info!("Running with PID file {:?}", normal_course.pid_file_path());

    normal_course.run()
        .wrap_err("The normal course was aborted")?;

    info!(
        "Traced {} segments with {} tones",
        controller.num_traced(),
        controller.num_tones()
    );

    Ok(())
}
