use std::io::Write;

use super::Emitter;
use crate::ast::{KEYWORD_RETURN, Stat};
use crate::error::{CoreError, NodeGroup};

impl<W: Write> Emitter<W> {
    pub(super) fn emit_stat(&mut self, stat: &Stat) -> Result<(), CoreError> {
        match stat {
            Stat::Return(value) => {
                self.write(KEYWORD_RETURN);
                if let Some(value) = value {
                    self.write(" ");
                    self.emit_expr(value)?;
                }
            }
            Stat::Call(call) => self.emit_call(call)?,
            Stat::Assign { target, value } => {
                self.emit_access(target);
                self.write(" = ");
                self.emit_expr(value)?;
            }
            Stat::Other => return Err(CoreError::Unsupported {
                group: NodeGroup::Statement,
            }),
        }
        self.write(";");
        self.newline();
        Ok(())
    }
}
