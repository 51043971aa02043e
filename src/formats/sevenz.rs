use crate::formats::{command, ExtractError};
use crate::ExtractionOptions;
use std::ffi::{OsStr, OsString};
use std::path::Path;

const PROGRAM: &str = "7z";

pub fn extract(source: &Path, dest: &Path, options: ExtractionOptions) -> Result<(), ExtractError> {
    let mut output = OsString::from("-o");
    output.push(dest);
    // -y answers any overwrite prompt, stdin is closed
    let args = [
        OsStr::new("x"),
        OsStr::new("-y"),
        source.as_os_str(),
        output.as_os_str(),
    ];
    command::run(PROGRAM, &args, options.command_timeout)
}
