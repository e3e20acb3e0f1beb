//! Command-line flags.
//!
//! Only the device-class flags are recognised. Anything else on the command
//! line is dropped before parsing instead of being reported as an error.

use clap::Parser;
use clvecadd_opencl::DeviceClass;
use std::ffi::OsString;

/// Time an element-wise integer vector addition on an OpenCL device.
#[derive(Debug, Parser)]
#[command(
    name = "clvecadd",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Cli {
    /// Run the kernel on an OpenCL CPU device (default)
    #[arg(short = 'c', long = "use-cpu", overrides_with = "use_gpu")]
    pub use_cpu: bool,

    /// Run the kernel on an OpenCL GPU device
    #[arg(short = 'g', long = "use-gpu", overrides_with = "use_cpu")]
    pub use_gpu: bool,
}

impl Cli {
    /// Device class selected by the last device flag given.
    pub fn device_class(&self) -> DeviceClass {
        DeviceClass::from_use_gpu(self.use_gpu)
    }
}

const KNOWN_LONG: [&str; 2] = ["--use-cpu", "--use-gpu"];
const KNOWN_SHORT: [char; 2] = ['c', 'g'];

/// Resolve a long option or an unambiguous prefix of one (`--use-g`).
fn resolve_long(text: &str) -> Option<&'static str> {
    let name = text.strip_prefix("--")?;
    if name.is_empty() {
        return None;
    }
    let mut matches = KNOWN_LONG.iter().copied().filter(|long| long[2..].starts_with(name));
    match (matches.next(), matches.next()) {
        (Some(long), None) => Some(long),
        _ => None,
    }
}

/// Split raw arguments into those the parser understands and those to ignore.
///
/// The first argument (program name) is always kept. Long flags may be
/// abbreviated to any unambiguous prefix; `--use-` matches both and is
/// ignored. Short flag clusters are filtered letter by letter, so `-cx` keeps
/// `-c` and ignores `x`. Everything after `--` is ignored. There is no help or
/// version flag.
pub fn split_known_args<I>(args: I) -> (Vec<OsString>, Vec<OsString>)
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut known: Vec<OsString> = args.next().into_iter().collect();
    let mut ignored = Vec::new();

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            ignored.push(arg);
            continue;
        };

        if text == "--" {
            ignored.push(arg);
            ignored.extend(args.by_ref());
            break;
        }

        if let Some(long) = resolve_long(text) {
            known.push(long.into());
            continue;
        }

        match text.strip_prefix('-') {
            Some(cluster) if !cluster.is_empty() && !cluster.starts_with('-') => {
                let (kept, dropped): (String, String) =
                    cluster.chars().partition(|ch| KNOWN_SHORT.contains(ch));
                if !kept.is_empty() {
                    known.push(format!("-{kept}").into());
                }
                if !dropped.is_empty() {
                    ignored.push(format!("-{dropped}").into());
                }
            }
            _ => ignored.push(arg),
        }
    }

    (known, ignored)
}
