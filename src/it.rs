use {
    crate::{
        it::{testrun::TestRun, tests::TestCase},
        leaks,
        logger::Logger,
        utils::errorfmt::ErrorFmt,
    },
    log::LevelFilter,
    std::sync::{Arc, OnceLock},
};

#[macro_use]
mod test_error;
mod test_gfx_api;
mod test_transport;

fn logger() -> Option<Arc<Logger>> {
    static LOGGER: OnceLock<Option<Arc<Logger>>> = OnceLock::new();
    LOGGER
        .get_or_init(|| match Logger::install_stderr(LevelFilter::Info) {
            Ok(logger) => Some(logger),
            Err(e) => {
                eprintln!("Could not install the logger: {}", ErrorFmt(e));
                None
            }
        })
        .clone()
}

pub fn run_test(test: &dyn TestCase) {
    let config = test.config();
    if let Some(logger) = logger() {
        logger.set_level(config.log_level);
    }
    log::info!("Running {}", test.name());
    let run = TestRun::new(config);
    let mut errors = vec![];
    if let Err(e) = test.run(run.clone()) {
        errors.push(e.to_string());
    }
    run.finish();
    errors.extend(run.errors.take());
    drop(run);
    let leaked = leaks::live_objects();
    if leaked > 0 {
        leaks::log_leaked();
        errors.push(format!("{} protocol objects outlived their client", leaked));
    }
    if errors.len() > 0 {
        log::error!("The following errors occurred in {}:", test.name());
        for e in &errors {
            log::error!("    {}", e);
        }
        panic!("Test {} failed: {}", test.name(), errors.join("; "));
    }
}
