use tabled::{Table, settings::Style};

/// Applies the table style shared by all commands
pub(crate) trait CrazyctlTable {
    fn styled(&mut self) -> &mut Self;
}

impl CrazyctlTable for Table {
    fn styled(&mut self) -> &mut Self {
        self.with(Style::psql())
    }
}
