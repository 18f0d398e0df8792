use crate::error::UsageError;

const COMM_FLAG: &str = "-comm";

/// Accepts either no arguments or exactly `-comm <source>`.
///
/// `args` excludes the program name.
pub fn parse_args<I>(args: I) -> Result<Option<String>, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    match args.as_slice() {
        [] => Ok(None),
        [flag, source] if flag == COMM_FLAG => Ok(Some(source.clone())),
        _ => Err(UsageError(args)),
    }
}

pub fn usage(program: &str) -> String {
    format!("usage: {} [{} <source>]", program, COMM_FLAG)
}
