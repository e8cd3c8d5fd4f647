/// Represents the branch a tag is created for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    is_primary: bool,
}

impl BranchContext {
    /// Create a branch context, comparing against the configured primary branch
    pub fn new(name: impl Into<String>, primary_branch: &str) -> Self {
        let name = name.into();
        let is_primary = name == primary_branch;

        BranchContext { name, is_primary }
    }

    /// Tags created on the primary branch carry no branch segment
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }
}
