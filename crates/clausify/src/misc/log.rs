pub mod targets {
    pub const NORMALIZE: &str = "normalize";
    pub const STANDARDIZE: &str = "standardize";
    pub const SKOLEM: &str = "skolem";
    pub const DISTRIBUTE: &str = "distribute";
    pub const CLAUSES: &str = "clauses";
    pub const PIPELINE: &str = "pipeline";
}
