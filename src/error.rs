use thiserror::Error;

/// Structural mismatches between the fetched page and what the parser expects.
///
/// None of these are recovered: the run aborts before anything is written.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no parameter table follows `{0}` and it does not say it requires no parameters")]
    MissingTable(String),

    #[error("row {row} of the table under `{heading}` has {cells} cells, expected at least 3")]
    UnexpectedColumns {
        heading: String,
        row: usize,
        cells: usize,
    },

    #[error("no h3 category heading precedes `{0}`")]
    MissingCategory(String),

    #[error("article heading `{0}` has no named anchor")]
    MissingAnchor(String),

    #[error("version marker (third <strong> element) not found")]
    MissingVersion,
}

#[derive(Debug, Error)]
pub enum BuildInfoError {
    #[error("running on CI but environment variable {0} is not set")]
    MissingEnv(&'static str),
}
