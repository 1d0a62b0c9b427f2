//! Parses blocks against the assigned variables and accumulates their output

mod output;
mod renderer;

#[cfg(test)]
mod tests;

pub use self::output::ParsedBlocks;
pub use self::renderer::Renderer;

/// Switches changing how tags without a value are handled during a parse pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    /// Remove variable tags that have no assigned value instead of leaving them as is
    pub autocleanup_unassigned_variables: bool,
    /// Reset the output of the direct children of a block once it is parsed
    pub autoreset_parsed_sub_blocks: bool,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings { autocleanup_unassigned_variables: true, autoreset_parsed_sub_blocks: true }
    }
}
