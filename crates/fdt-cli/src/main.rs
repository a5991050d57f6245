use fdt_runtime::ModuleTable;
use std::process::ExitCode;

#[path = "../demos/broken_test.rs"]
mod broken_test;
#[path = "../demos/failing_test.rs"]
mod failing_test;
#[path = "../demos/only_test.rs"]
mod only_test;
#[path = "../demos/passing_test.rs"]
mod passing_test;

fn main() -> ExitCode {
    let modules = ModuleTable::new()
        .module("demos/passing_test.rs", passing_test::register)
        .module("demos/failing_test.rs", failing_test::register)
        .module("demos/only_test.rs", only_test::register)
        .module("demos/broken_test.rs", broken_test::register);

    fdt_cli::main(modules)
}
