use rellang_core::{DomCod, RelationType, SetType, Statement, StructuralEq};

use super::syntax::{DomCodSyntax, RelExprSyntax, SetExprSyntax, StmtSyntax};
use super::{AnalyzeError, Checker, SymbolEnvironment, analyze, analyze_in};

fn name(name: &str) -> SetExprSyntax {
    SetExprSyntax::name(name)
}

fn annotated(rel: &str, domain: &str, codomain: &str) -> RelExprSyntax {
    RelExprSyntax::annotated(rel, DomCodSyntax::new(name(domain), name(codomain)))
}

fn dc(domain: &str, codomain: &str) -> DomCod {
    DomCod::new(SetType::atomic(domain), SetType::atomic(codomain))
}

#[test]
fn atomic_relation_with_product_codomain() {
    let stmt = StmtSyntax::RelExpression(RelExprSyntax::annotated(
        "R",
        DomCodSyntax::new(name("A"), SetExprSyntax::product(name("B"), name("C"))),
    ));

    let program = analyze(&[stmt]).unwrap();

    let expected = RelationType::atomic(
        "R",
        DomCod::new(
            SetType::atomic("A"),
            SetType::product(SetType::atomic("B"), SetType::atomic("C")),
        ),
    );
    assert_eq!(
        program.statements(),
        &[Statement::Relation(expected)]
    );
}

#[test]
fn composition_infers_outer_sides() {
    let stmt = StmtSyntax::RelExpression(RelExprSyntax::composition(
        annotated("R", "A", "B"),
        annotated("S", "B", "C"),
    ));

    let program = analyze(&[stmt]).unwrap();

    let rel = program.statements()[0].as_relation().unwrap();
    assert!(matches!(rel, RelationType::Composition { .. }));
    assert_eq!(rel.dom_cod(), &dc("A", "C"));
}

#[test]
fn composition_mismatch() {
    let stmt = StmtSyntax::RelExpression(RelExprSyntax::composition(
        annotated("R", "A", "B"),
        annotated("S", "C", "D"),
    ));

    assert_eq!(
        analyze(&[stmt]).unwrap_err(),
        AnalyzeError::CompositionTypeMismatch {
            left_codomain: SetType::atomic("B"),
            right_domain: SetType::atomic("C"),
        }
    );
}

#[test]
fn associativity_does_not_change_composition_type() {
    let left = RelExprSyntax::composition(
        RelExprSyntax::composition(annotated("R", "A", "B"), annotated("S", "B", "C")),
        annotated("T", "C", "D"),
    );
    let right = RelExprSyntax::composition(
        annotated("R", "A", "B"),
        RelExprSyntax::composition(annotated("S", "B", "C"), annotated("T", "C", "D")),
    );

    let left = analyze(&[StmtSyntax::RelExpression(left)]).unwrap();
    let right = analyze(&[StmtSyntax::RelExpression(right)]).unwrap();

    let left = left.statements()[0].as_relation().unwrap();
    let right = right.statements()[0].as_relation().unwrap();
    assert!(left.dom_cod().structurally_eq(right.dom_cod()));
    assert_ne!(left, right);
}

#[test]
fn rel_definition_then_reference() {
    let stmts = [
        StmtSyntax::RelDefinition {
            name: "R".to_string(),
            body: annotated("S", "A", "B"),
        },
        StmtSyntax::RelDefinition {
            name: "R2".to_string(),
            body: RelExprSyntax::name("R"),
        },
    ];
    let mut env = SymbolEnvironment::new();

    let program = analyze_in(&stmts, &mut env).unwrap();

    assert_eq!(program.len(), 2);
    assert_eq!(env.lookup_rel("R2").unwrap().dom_cod(), &dc("A", "B"));
}

#[test]
fn definition_body_is_checked_before_binding() {
    let stmt = StmtSyntax::RelDefinition {
        name: "R".to_string(),
        body: annotated("R", "A", "B"),
    };

    assert_eq!(
        analyze(&[stmt]).unwrap_err(),
        AnalyzeError::NameCollision {
            name: "R".to_string()
        }
    );
}

#[test]
fn explicit_annotation_mismatch() {
    let stmt = StmtSyntax::RelExpression(RelExprSyntax::ascription(
        RelExprSyntax::composition(annotated("R", "A", "B"), annotated("S", "B", "C")),
        DomCodSyntax::new(name("A"), name("D")),
    ));

    assert_eq!(
        analyze(&[stmt]).unwrap_err(),
        AnalyzeError::ExplicitAnnotationMismatch {
            inferred: dc("A", "C"),
            declared: dc("A", "D"),
        }
    );
}

#[test]
fn left_operand_errors_win() {
    let stmt = StmtSyntax::RelExpression(RelExprSyntax::product(
        RelExprSyntax::name("P"),
        RelExprSyntax::name("Q"),
    ));

    let err = analyze(&[stmt]).unwrap_err();

    assert!(matches!(err, AnalyzeError::UndefinedName { ref name, .. } if name == "P"));
}

#[test]
fn checker_keeps_environment_between_statements() {
    let mut env = SymbolEnvironment::new();
    let mut checker = Checker::new(&mut env);

    checker
        .check_statement(&StmtSyntax::SetDefinition {
            name: "X".to_string(),
            body: SetExprSyntax::coproduct(name("A"), name("B")),
        })
        .unwrap();
    let set = checker.set_expr(&name("X")).unwrap();

    assert_eq!(set, SetType::defined("X"));
    assert!(checker.env().is_used("B"));
}

#[test]
fn error_display_matches_message_format() {
    let err = AnalyzeError::CompositionTypeMismatch {
        left_codomain: SetType::product(SetType::atomic("A"), SetType::atomic("B")),
        right_domain: SetType::atomic("C"),
    };

    insta::assert_snapshot!(err.to_string(), @"type mismatch in composition: A * B ≠ C");
    assert_eq!(err.detail(), "A * B ≠ C");
}

#[test]
fn long_left_nested_chain() {
    let chain = (1..2_000).fold(annotated("R", "A", "A"), |chain, _| {
        RelExprSyntax::composition(chain, annotated("R", "A", "A"))
    });

    let program = analyze(&[StmtSyntax::RelExpression(chain)]).unwrap();

    let relation = program.statements()[0].as_relation().unwrap();
    assert_eq!(relation.dom_cod(), &dc("A", "A"));
}

#[test]
fn long_chain_stops_at_first_mismatch() {
    let chain = (1..2_000).fold(annotated("R", "A", "A"), |chain, i| {
        let next = if i == 700 {
            annotated("S", "B", "A")
        } else {
            annotated("R", "A", "A")
        };
        RelExprSyntax::composition(chain, next)
    });

    assert_eq!(
        analyze(&[StmtSyntax::RelExpression(chain)]).unwrap_err(),
        AnalyzeError::CompositionTypeMismatch {
            left_codomain: SetType::atomic("A"),
            right_domain: SetType::atomic("B"),
        }
    );
}

#[test]
fn long_set_chains_in_both_directions() {
    let left_deep = (1..2_000).fold(name("A"), |set, _| {
        SetExprSyntax::product(set, name("A"))
    });
    let right_deep = (1..2_000).fold(name("B"), |set, _| {
        SetExprSyntax::coproduct(name("B"), set)
    });
    let mut env = SymbolEnvironment::new();
    let mut checker = Checker::new(&mut env);

    let left_deep = checker.set_expr(&left_deep).unwrap();
    let right_deep = checker.set_expr(&right_deep).unwrap();

    assert!(matches!(left_deep, SetType::Product { .. }));
    assert!(matches!(right_deep, SetType::Coproduct { .. }));
    assert!(env.is_used("A"));
    assert!(env.is_used("B"));
}
