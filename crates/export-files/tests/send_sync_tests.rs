//! Thread-safety guarantees for types shared across server tasks.

use rsocket_export_files::{ArchiveOptions, ExportOptions, FilePath, FileSystem, FilesError};

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_types_are_send_sync() {
    assert_send_sync::<FileSystem>();
    assert_send_sync::<FilePath>();
    assert_send_sync::<ArchiveOptions>();
    assert_send_sync::<ExportOptions>();
    assert_send_sync::<FilesError>();
}
