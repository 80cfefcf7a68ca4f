//! Template types for typed variable injection.

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Embedded template rendered with a variable set
#[derive(Debug, Clone, Copy)]
pub struct Template {
    content: &'static str,
}

impl Template {
    pub const fn new(content: &'static str) -> Self {
        Self { content }
    }

    pub fn render(&self, vars: &impl TemplateVars) -> String {
        vars.apply(self.content)
    }
}
