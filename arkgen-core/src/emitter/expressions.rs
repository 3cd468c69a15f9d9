use std::io::Write;

use super::Emitter;
use crate::ast::{AccessExpr, BinOp, CallExpr, DEREF_MARKER, Expr, Type, UnOp};
use crate::error::{CoreError, NodeGroup};

impl<W: Write> Emitter<W> {
    pub(super) fn emit_expr(&mut self, expr: &Expr) -> Result<(), CoreError> {
        match expr {
            Expr::Rune(value) => self.emit_rune_literal(*value),
            Expr::Integer(value) => self.emit_integer_literal(*value),
            Expr::Floating(value) => self.emit_floating_literal(*value),
            Expr::String(value) => self.emit_string_literal(value),
            Expr::Binary { op, lhs, rhs } => self.emit_binary(*op, lhs, rhs)?,
            Expr::Unary { op, operand } => self.emit_unary(*op, operand)?,
            Expr::Cast { ty, operand } => self.emit_cast(ty, operand)?,
            Expr::Call(call) => self.emit_call(call)?,
            Expr::Access(access) => self.emit_access(access),
            Expr::Deref(operand) => {
                self.write(DEREF_MARKER);
                self.emit_expr(operand)?;
            }
            Expr::Other => return Err(CoreError::Unsupported {
                group: NodeGroup::Expression,
            }),
        }
        Ok(())
    }

    // =========================================================================
    // Operators
    // =========================================================================

    /// Grouping is carried by the tree, so no parentheses are added.
    fn emit_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr) -> Result<(), CoreError> {
        self.emit_expr(lhs)?;
        self.write(" ");
        self.write(op.token());
        self.write(" ");
        self.emit_expr(rhs)
    }

    fn emit_unary(&mut self, op: UnOp, operand: &Expr) -> Result<(), CoreError> {
        self.write(op.token());
        self.write(" ");
        self.emit_expr(operand)
    }

    fn emit_cast(&mut self, ty: &Type, operand: &Expr) -> Result<(), CoreError> {
        self.write(&ty.type_name());
        self.write("(");
        self.emit_expr(operand)?;
        self.write(")");
        Ok(())
    }

    pub(super) fn emit_call(&mut self, call: &CallExpr) -> Result<(), CoreError> {
        self.write(&call.callee);
        self.write("(");
        for (i, arg) in call.args.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expr(arg)?;
        }
        self.write(")");
        Ok(())
    }

    pub(super) fn emit_access(&mut self, access: &AccessExpr) {
        for (i, segment) in access.path.iter().enumerate() {
            if i > 0 {
                self.write(".");
            }
            self.write(segment);
        }
    }
}
