use regman_core::runtime::TargetRuntime;
use std::sync::Arc;

mod file;

pub fn init() -> TargetRuntime {
    TargetRuntime {
        file: Arc::new(file::NativeFileIO::default()),
    }
}
