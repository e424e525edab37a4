//! Typed-AST construction with inference, annotation checks and name
//! resolution. One method per grammar production; each either returns the
//! typed node or the first error.

use rellang_core::{Definition, DomCod, Program, RelationType, SetType, Statement, StructuralEq};

use super::error::{AnalyzeError, NameKind};
use super::symbol_env::SymbolEnvironment;

pub struct AstBuilder<'env> {
    env: &'env mut SymbolEnvironment,
}

impl<'env> AstBuilder<'env> {
    pub fn new(env: &'env mut SymbolEnvironment) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &SymbolEnvironment {
        self.env
    }

    /// Declared sets resolve by reference; any other name becomes a primitive.
    pub fn set_name(&mut self, name: &str) -> Result<SetType, AnalyzeError> {
        if self.env.contains_set(name) {
            log::trace!("set `{name}` resolves to its definition");
            return Ok(SetType::defined(name));
        }
        if self.env.contains_rel(name) {
            return Err(AnalyzeError::UndefinedName {
                name: name.to_string(),
                kind: NameKind::Set,
            });
        }
        self.env.use_name(name);
        Ok(SetType::atomic(name))
    }

    pub fn set_product(&self, left: SetType, right: SetType) -> SetType {
        SetType::product(left, right)
    }

    pub fn set_coproduct(&self, left: SetType, right: SetType) -> SetType {
        SetType::coproduct(left, right)
    }

    pub fn dom_cod(&self, domain: SetType, codomain: SetType) -> DomCod {
        DomCod::new(domain, codomain)
    }

    /// `name : domain -> codomain`
    pub fn annotated_rel(
        &mut self,
        name: &str,
        dom_cod: DomCod,
    ) -> Result<RelationType, AnalyzeError> {
        if let Ok(declared) = self.env.lookup_rel(name) {
            let declared = declared.dom_cod();
            if !declared.structurally_eq(&dom_cod) {
                return Err(AnalyzeError::AnnotationMismatch {
                    name: name.to_string(),
                    declared: declared.clone(),
                    inline: dom_cod,
                });
            }
            log::trace!("annotated `{name}` matches its definition");
            return Ok(RelationType::defined(name, declared.clone()));
        }

        self.env.use_name(name);
        log::trace!("atomic relation `{name}` : {dom_cod}");
        Ok(RelationType::atomic(name, dom_cod))
    }

    /// Bare name in relation position.
    pub fn rel_name(&mut self, name: &str) -> Result<RelationType, AnalyzeError> {
        let declared = self.env.lookup_rel(name)?;
        Ok(RelationType::defined(name, declared.dom_cod().clone()))
    }

    /// `left ; right`
    pub fn composition(
        &self,
        left: RelationType,
        right: RelationType,
    ) -> Result<RelationType, AnalyzeError> {
        if !left.codomain().structurally_eq(right.domain()) {
            return Err(AnalyzeError::CompositionTypeMismatch {
                left_codomain: left.codomain().clone(),
                right_domain: right.domain().clone(),
            });
        }
        let dom_cod = DomCod::new(left.domain().clone(), right.codomain().clone());
        log::trace!("composition : {dom_cod}");
        Ok(RelationType::composition(left, right, dom_cod))
    }

    /// `left * right`
    pub fn product(&self, left: RelationType, right: RelationType) -> RelationType {
        let dom_cod = DomCod::new(
            SetType::product(left.domain().clone(), right.domain().clone()),
            SetType::product(left.codomain().clone(), right.codomain().clone()),
        );
        RelationType::product(left, right, dom_cod)
    }

    /// `left + right`
    pub fn coproduct(&self, left: RelationType, right: RelationType) -> RelationType {
        let dom_cod = DomCod::new(
            SetType::coproduct(left.domain().clone(), right.domain().clone()),
            SetType::coproduct(left.codomain().clone(), right.codomain().clone()),
        );
        RelationType::coproduct(left, right, dom_cod)
    }

    /// `expr : domain -> codomain`. Returns the inferred node unchanged.
    pub fn annotate(
        &self,
        expr: RelationType,
        declared: DomCod,
    ) -> Result<RelationType, AnalyzeError> {
        if !expr.dom_cod().structurally_eq(&declared) {
            return Err(AnalyzeError::ExplicitAnnotationMismatch {
                inferred: expr.dom_cod().clone(),
                declared,
            });
        }
        Ok(expr)
    }

    /// `set name := body`; the body is built before the name is bound.
    pub fn set_definition(&mut self, name: &str, body: SetType) -> Result<Statement, AnalyzeError> {
        self.env.define_set(name, body.clone())?;
        Ok(Statement::Definition(Definition::Set {
            name: name.to_string(),
            body,
        }))
    }

    /// `rel name := body`; the body is built before the name is bound.
    pub fn rel_definition(
        &mut self,
        name: &str,
        body: RelationType,
    ) -> Result<Statement, AnalyzeError> {
        self.env.define_rel(name, body.clone())?;
        Ok(Statement::Definition(Definition::Rel {
            name: name.to_string(),
            body,
        }))
    }

    pub fn expression(&self, expr: RelationType) -> Statement {
        Statement::Relation(expr)
    }

    pub fn program(&self, statements: Vec<Statement>) -> Program {
        Program::new(statements)
    }
}
