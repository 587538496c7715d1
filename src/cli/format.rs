//! Format output dispatch helpers

/// Dispatch on the output format when the json branch returns a `Result`
/// and the human branch only prints.
///
/// ```rust,ignore
/// output_by_format_result!(cli.format,
///     json => {
///         println!("{}", serde_json::to_string_pretty(&data)?);
///         Ok(())
///     },
///     human => { println!("done"); }
/// )
/// ```
#[macro_export]
macro_rules! output_by_format_result {
    ($format:expr, json => $json:expr, human => $human:block) => {
        match $format {
            $crate::cli::OutputFormat::Json => $json,
            $crate::cli::OutputFormat::Human => {
                $human;
                Ok(())
            }
        }
    };
}
