use std::io::Write;

use super::Emitter;
use crate::ast::{Decl, Function, KEYWORD_FUNC, KEYWORD_MUT, KEYWORD_STRUCT, Struct, VariableDecl};
use crate::error::{CoreError, NodeGroup};

impl<W: Write> Emitter<W> {
    // =========================================================================
    // Declarations
    // =========================================================================

    pub(super) fn emit_decl(&mut self, decl: &Decl) -> Result<(), CoreError> {
        match decl {
            Decl::Function(function) => {
                self.newline();
                self.emit_function(function)
            }
            Decl::Struct(decl) => {
                self.newline();
                self.emit_struct(decl)
            }
            Decl::Variable(decl) => self.emit_variable_decl(decl, true),
            Decl::Other => Err(CoreError::Unsupported {
                group: NodeGroup::Declaration,
            }),
        }
    }

    fn emit_function(&mut self, function: &Function) -> Result<(), CoreError> {
        self.emit_attrs(&function.attrs);
        self.write(KEYWORD_FUNC);
        self.write(" ");
        self.write(&function.name);
        self.write("(");
        for (i, param) in function.params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_variable_decl(param, false)?;
        }
        self.write(")");

        if let Some(ty) = &function.return_type {
            self.write(": ");
            self.write(&ty.type_name());
        }
        self.write(" ");
        self.emit_block(&function.body)?;
        self.newline();
        Ok(())
    }

    fn emit_struct(&mut self, decl: &Struct) -> Result<(), CoreError> {
        self.emit_attrs(&decl.attrs);
        self.write(KEYWORD_STRUCT);
        self.write(" ");
        self.write(&decl.name);
        self.write(" {");
        self.writer.indent();
        self.newline();

        let last = decl.members.len().saturating_sub(1);
        for (i, member) in decl.members.iter().enumerate() {
            self.emit_variable_decl(member, false)?;
            if i == last {
                self.writer.dedent();
            } else {
                self.write(",");
            }
            self.newline();
        }
        if decl.members.is_empty() {
            self.writer.dedent();
        }

        self.write("}");
        self.newline();
        Ok(())
    }

    /// `semicolon` is set for statement position; parameters and struct
    /// members render bare.
    pub(super) fn emit_variable_decl(
        &mut self,
        decl: &VariableDecl,
        semicolon: bool,
    ) -> Result<(), CoreError> {
        let variable = &decl.variable;
        self.emit_attrs(&variable.attrs);
        if variable.mutable {
            self.write(KEYWORD_MUT);
            self.write(" ");
        }
        self.write(&variable.name);
        self.write(": ");
        self.write(&variable.ty.type_name());
        if let Some(init) = &decl.init {
            self.write(" = ");
            self.emit_expr(init)?;
        }
        if semicolon {
            self.write(";");
            self.newline();
        }
        Ok(())
    }
}
