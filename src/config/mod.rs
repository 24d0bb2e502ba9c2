pub(crate) mod database;
pub(crate) mod logging;
pub(crate) mod parameter;

/// One-stop initialization for unit tests that touch configuration.
#[cfg(test)]
pub(crate) fn init_test_config() {
    parameter::init_for_tests();
    logging::init();
}
