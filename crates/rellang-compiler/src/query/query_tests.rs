use indoc::indoc;

use super::DEFAULT_RECURSION_FUEL;
use crate::{AnalyzeError, DiagnosticKind, Error, NameKind, Query, check};
use rellang_core::{Definition, DomCod, Program, RelationType, SetType, Statement};

impl<'q> Query<'q> {
    #[track_caller]
    pub fn expect(src: &'q str) -> Self {
        Query::try_from(src).unwrap()
    }

    #[track_caller]
    pub fn expect_valid(src: &'q str) -> Self {
        let query = Query::expect(src);
        if !query.is_valid() {
            panic!(
                "Expected valid program, got error:\n{}",
                query.dump_diagnostics()
            );
        }

        query
    }

    /// CST of a source that has no syntax errors (semantic errors are allowed).
    #[track_caller]
    pub fn expect_cst(src: &'q str) -> String {
        let query = Query::expect(src);
        if query.diagnostics().kinds().any(|kind| !kind.is_semantic()) {
            panic!(
                "Expected no syntax errors, got:\n{}",
                query.dump_diagnostics()
            );
        }

        query.dump_cst()
    }

    #[track_caller]
    pub fn expect_valid_program(src: &'q str) -> String {
        Query::expect_valid(src).dump_program()
    }

    #[track_caller]
    pub fn expect_checked(src: &'q str) -> Program {
        match Query::expect_valid(src).program() {
            Some(program) => program.clone(),
            None => panic!("valid query without a program"),
        }
    }

    #[track_caller]
    pub fn expect_invalid(src: &'q str) -> String {
        let query = Query::expect(src);
        if query.is_valid() {
            panic!("Expected invalid program, got valid:\n{}", query.dump_cst());
        }

        query.dump_diagnostics()
    }

    #[track_caller]
    pub fn expect_analyze_error(src: &'q str) -> AnalyzeError {
        let query = Query::expect(src);
        match query.analyze_error() {
            Some(err) => err.clone(),
            None => panic!(
                "Expected a semantic error, got:\n{}",
                query.dump_diagnostics()
            ),
        }
    }
}

fn atom(name: &str) -> SetType {
    SetType::atomic(name)
}

fn dc(domain: SetType, codomain: SetType) -> DomCod {
    DomCod::new(domain, codomain)
}

fn last_relation(program: &Program) -> &RelationType {
    program
        .iter()
        .last()
        .and_then(Statement::as_relation)
        .unwrap()
}

#[test]
fn atomic_relation_with_product_codomain() {
    let program = Query::expect_checked("R : A -> B * C");

    let expected = RelationType::atomic("R", dc(atom("A"), SetType::product(atom("B"), atom("C"))));
    assert_eq!(last_relation(&program), &expected);
}

#[test]
fn composition_of_matching_relations() {
    let res = Query::expect_valid_program("(R : A -> B);(S : B -> C)");

    insta::assert_snapshot!(res, @r"
    Program
      Expr
        Composition : A -> C
          Atomic R : A -> B
          Atomic S : B -> C
    ");
}

#[test]
fn composition_mismatch_reports_both_sides() {
    let err = Query::expect_analyze_error("(R : A -> B);(S : C -> D)");

    assert_eq!(
        err,
        AnalyzeError::CompositionTypeMismatch {
            left_codomain: atom("B"),
            right_domain: atom("C"),
        }
    );
}

#[test]
fn composition_mismatch_diagnostic() {
    let res = Query::expect_invalid("(R : A -> B);(S : C -> D)");

    insta::assert_snapshot!(res, @"error: type mismatch in composition: B ≠ C at 0..25");
}

#[test]
fn defined_relation_resolves_by_name() {
    let input = indoc! {r#"
    rel R := RR: A -> B
    R;S: B -> C
    "#};

    let res = Query::expect_valid_program(input);

    insta::assert_snapshot!(res, @r"
    Program
      RelDef R
        Atomic RR : A -> B
      Expr
        Composition : A -> C
          Defined R : A -> B
          Atomic S : B -> C
    ");
}

#[test]
fn definition_of_a_definition_copies_dom_cod() {
    let input = indoc! {r#"
    rel R := S : A -> B
    rel R2 := R
    "#};

    let query = Query::expect_valid(input);

    let r2 = query.env().lookup_rel("R2").unwrap();
    assert_eq!(r2, &RelationType::defined("R", dc(atom("A"), atom("B"))));
}

#[test]
fn explicit_annotation_mismatch() {
    let err = Query::expect_analyze_error("(R:A->B;S:B->C): A -> D");

    assert_eq!(
        err,
        AnalyzeError::ExplicitAnnotationMismatch {
            inferred: dc(atom("A"), atom("C")),
            declared: dc(atom("A"), atom("D")),
        }
    );
    insta::assert_snapshot!(
        err.to_string(),
        @"type mismatch: expression has type A -> C but was declared with type A -> D"
    );
}

#[test]
fn matching_annotation_is_transparent() {
    let annotated = Query::expect_checked("(R : A -> B ; S : B -> C) : A -> C");
    let bare = Query::expect_checked("R : A -> B ; S : B -> C");

    assert_eq!(annotated, bare);
}

#[test]
fn forward_reference_is_rejected() {
    let input = indoc! {r#"
    R ; S : B -> C
    rel R := T : A -> B
    "#};

    let err = Query::expect_analyze_error(input);

    assert_eq!(
        err,
        AnalyzeError::UndefinedName {
            name: "R".to_string(),
            kind: NameKind::Relation,
        }
    );
}

#[test]
fn set_then_rel_with_same_name_collides() {
    let input = indoc! {r#"
    set A := X * Y
    rel A := R : X -> Y
    "#};

    let res = Query::expect_invalid(input);

    insta::assert_snapshot!(res, @"error: name is already in use: `A` at 15..34");
}

#[test]
fn rel_then_set_with_same_name_collides() {
    let input = indoc! {r#"
    rel A := R : X -> Y
    set A := X * Y
    "#};

    let err = Query::expect_analyze_error(input);

    assert_eq!(
        err,
        AnalyzeError::NameCollision {
            name: "A".to_string()
        }
    );
}

#[test]
fn primitive_name_cannot_be_defined_later() {
    let input = indoc! {r#"
    R : A -> B
    set A := C
    "#};

    let err = Query::expect_analyze_error(input);

    assert_eq!(
        err,
        AnalyzeError::NameCollision {
            name: "A".to_string()
        }
    );
}

#[test]
fn keywords_cannot_be_redefined() {
    let query = Query::expect("set set := A");

    assert!(!query.is_valid());
    assert!(query.analyze_error().is_none());
}

#[test]
fn declared_set_resolves_as_reference() {
    let input = indoc! {r#"
    set X := A * B
    rel R := S: X -> C
    R: X -> C
    "#};

    let program = Query::expect_checked(input);

    assert_eq!(program.len(), 3);
    let declared = dc(SetType::defined("X"), atom("C"));
    assert_eq!(
        last_relation(&program),
        &RelationType::defined("R", declared)
    );
}

#[test]
fn inline_annotation_must_match_definition() {
    let input = indoc! {r#"
    rel R := S : A -> B
    R : A -> C
    "#};

    let res = Query::expect_invalid(input);

    insta::assert_snapshot!(res, @"error: annotation does not match the definition: `R` is declared as A -> B but annotated as A -> C at 20..30");
}

#[test]
fn relation_name_in_set_position_is_undefined() {
    let input = indoc! {r#"
    rel R := S : A -> B
    T : R -> B
    "#};

    let err = Query::expect_analyze_error(input);

    assert_eq!(
        err,
        AnalyzeError::UndefinedName {
            name: "R".to_string(),
            kind: NameKind::Set,
        }
    );
}

#[test]
fn analysis_stops_at_first_failing_statement() {
    let input = indoc! {r#"
    R : A -> B
    S
    T
    "#};

    let query = Query::expect(input);

    assert_eq!(query.diagnostics().len(), 1);
    assert!(query.program().is_none());
    assert!(query.env().is_used("R"));
    assert!(!query.env().is_used("T"));
}

#[test]
fn syntax_errors_skip_analysis() {
    let query = Query::expect("R : A B\nS");

    assert!(!query.is_valid());
    assert!(query.analyze_error().is_none());
    assert!(query.statements().is_empty());
    assert_eq!(
        query.diagnostics().kinds().next(),
        Some(DiagnosticKind::ExpectedArrow)
    );
}

#[test]
fn whitespace_and_blank_lines_do_not_matter() {
    let compact = Query::expect_checked("set X := A*B\nrel R := S:X->C\nR;T:C->D");
    let spaced = Query::expect_checked(indoc! {"

        set X   :=  A * B


        rel R := S :  X  ->  C
        R ;   T : C -> D

    "});

    assert_eq!(compact, spaced);
}

#[test]
fn redundant_parentheses_do_not_matter() {
    let bare = Query::expect_checked("R: A -> B * C; S: B * C -> D");
    let wrapped = Query::expect_checked("((R: (A) -> ((B * C)))); ((S: (B * C) -> D))");

    assert_eq!(bare, wrapped);
}

#[test]
fn product_and_coproduct_of_relations() {
    let res = Query::expect_valid_program("(R: A -> B * S: C -> D) + T: E -> F;U: (B * D + F) -> G");

    insta::assert_snapshot!(res, @r"
    Program
      Expr
        Composition : A * C + E -> G
          Coproduct : A * C + E -> B * D + F
            Product : A * C -> B * D
              Atomic R : A -> B
              Atomic S : C -> D
            Atomic T : E -> F
          Atomic U : B * D + F -> G
    ");
}

#[test]
fn grouping_of_mixed_operators_is_stable() {
    let first = Query::expect_checked("(R: A -> B * S: C -> D) + T: E -> F;U: (B * D + F) -> G");
    let second =
        Query::expect_checked("(R: A -> B) * (S: C -> D) + (T: E -> F);(U: (B * D) + F -> G)");

    assert_eq!(first, second);
}

#[test]
fn codomain_operator_before_annotated_relation_applies_to_relations() {
    let with_parens = Query::expect_checked("R: A -> B + (S: B -> C)");
    let explicit = Query::expect_checked("(R: A -> B) + (S: B -> C)");

    assert_eq!(with_parens, explicit);
    let RelationType::Coproduct { dom_cod, .. } = last_relation(&with_parens) else {
        panic!("expected a coproduct");
    };
    assert_eq!(dom_cod.domain(), &SetType::coproduct(atom("A"), atom("B")));
}

#[test]
fn precedence_of_relation_operators() {
    let input = indoc! {r#"
    rel R := RR : A -> B
    rel S := SS : C -> D
    rel T := TT : B * D -> E
    rel U := UU : E -> F
    R * S ; T ; U
    "#};

    let res = Query::expect_valid_program(input);

    insta::assert_snapshot!(res, @r"
    Program
      RelDef R
        Atomic RR : A -> B
      RelDef S
        Atomic SS : C -> D
      RelDef T
        Atomic TT : B * D -> E
      RelDef U
        Atomic UU : E -> F
      Expr
        Composition : A * C -> F
          Composition : A * C -> E
            Product : A * C -> B * D
              Defined R : A -> B
              Defined S : C -> D
            Defined T : B * D -> E
          Defined U : E -> F
    ");
}

#[test]
fn product_of_sums_keeps_parentheses_in_tree() {
    let input = indoc! {r#"
    rel R := RR : A -> B
    rel S := SS : C -> D
    rel T := TT : E -> F
    rel U := UU : G -> H
    (R*S)+(T*U)
    "#};

    let program = Query::expect_checked(input);

    let RelationType::Coproduct { dom_cod, .. } = last_relation(&program) else {
        panic!("expected a coproduct");
    };
    assert_eq!(dom_cod.to_string(), "A * C + E * G -> B * D + F * H");
}

#[test]
fn composition_typing_ignores_grouping() {
    let left = Query::expect_checked("(R : A -> B ; S : B -> C) ; T : C -> D");
    let right = Query::expect_checked("R : A -> B ; (S : B -> C ; T : C -> D)");

    let left = last_relation(&left).dom_cod();
    let right = last_relation(&right).dom_cod();
    assert_eq!(left, right);
}

#[test]
fn three_statements_with_defined_set() {
    let input = indoc! {r#"
    set X := A * B
    rel R := S: X -> C
    R: X -> C
    "#};

    let query = Query::expect_valid(input);

    assert_eq!(query.statements().len(), 3);
    assert_eq!(query.program().map(Program::len), Some(3));
    let sets: Vec<_> = query.env().set_definitions().map(|(name, _)| name).collect();
    assert_eq!(sets, vec!["X"]);
    let definitions: Vec<_> = query
        .program()
        .into_iter()
        .flat_map(Program::iter)
        .filter_map(Statement::as_definition)
        .map(Definition::name)
        .collect();
    assert_eq!(definitions, vec!["X", "R"]);
}

#[test]
fn program_serializes_to_tagged_json() {
    let program = Query::expect_checked("rel R := RR : A -> B\nR ; S : B -> C");

    let set = |name: &str| serde_json::json!({ "operation": "atomic", "name": name });
    assert_eq!(
        serde_json::to_value(&program).unwrap(),
        serde_json::json!({
            "type": "program",
            "expr": [
                {
                    "expr": {
                        "type": "definition",
                        "expr_type": "relation",
                        "name": "R",
                        "body": {
                            "type": "relation",
                            "operation": "atomic",
                            "rel_name": "RR",
                            "dom_cod": { "domain": set("A"), "codomain": set("B") },
                        },
                    }
                },
                {
                    "expr": {
                        "type": "relation",
                        "operation": "composition",
                        "left": {
                            "type": "relation",
                            "operation": "defined",
                            "name": "R",
                            "dom_cod": { "domain": set("A"), "codomain": set("B") },
                        },
                        "right": {
                            "type": "relation",
                            "operation": "atomic",
                            "rel_name": "S",
                            "dom_cod": { "domain": set("B"), "codomain": set("C") },
                        },
                        "dom_cod": { "domain": set("A"), "codomain": set("C") },
                    }
                },
            ],
        })
    );
}

#[test]
fn check_maps_errors() {
    assert!(check("R : A -> B").is_ok());

    let err = check("R : A").unwrap_err();
    assert!(matches!(err, Error::Parse(ref diagnostics) if diagnostics.len() == 1));

    let err = check("(R : A -> B);(S : C -> D)").unwrap_err();
    assert!(matches!(
        err,
        Error::Analyze(AnalyzeError::CompositionTypeMismatch { .. })
    ));
}

#[test]
fn parse_error_counts_diagnostics() {
    let err = check("R : A\nS : B").unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"program parsing failed with 2 errors");
}

#[test]
fn empty_program_is_valid() {
    let program = Query::expect_checked("\n\n");

    assert!(program.is_empty());
}

#[test]
fn exec_fuel_exhaustion_is_fatal() {
    let err = Query::new("R : A -> B").with_exec_fuel(Some(2)).exec().unwrap_err();

    assert!(matches!(err, Error::ExecFuelExhausted));
}

#[test]
fn recursion_fuel_exhaustion_is_fatal() {
    let source = format!("{}R : A -> B{}", "(".repeat(10), ")".repeat(10));

    let err = Query::new(&source)
        .with_recursion_fuel(Some(4))
        .exec()
        .unwrap_err();

    assert!(matches!(err, Error::RecursionLimitExceeded));
}

#[test]
fn unlimited_fuel_accepts_deep_nesting() {
    let source = format!("{}R : A -> B{}", "(".repeat(200), ")".repeat(200));

    let query = Query::new(&source)
        .with_exec_fuel(None)
        .with_recursion_fuel(None)
        .exec()
        .unwrap();

    assert!(query.is_valid());
    assert_eq!(query.exec_fuel_consumed(), 0);
}

#[test]
fn long_composition_chain_is_checked() {
    let source = vec!["R : A -> A"; 2_000].join(" ; ");

    let program = Query::expect_checked(&source);

    let relation = last_relation(&program);
    assert!(matches!(relation, RelationType::Composition { .. }));
    assert_eq!(relation.dom_cod(), &dc(atom("A"), atom("A")));
}

#[test]
fn long_mismatched_chain_reports_first_break() {
    let mut operands = vec!["R : A -> A"; 2_000];
    operands[1_500] = "S : B -> B";
    let source = operands.join(" ; ");

    let err = Query::expect_analyze_error(&source);

    assert_eq!(
        err,
        AnalyzeError::CompositionTypeMismatch {
            left_codomain: atom("A"),
            right_domain: atom("B"),
        }
    );
}

#[test]
fn long_set_chain_is_checked() {
    let domain = vec!["A"; 2_000].join(" * ");
    let source = format!("set X := {domain}\nR : X -> B");

    let program = Query::expect_checked(&source);

    assert_eq!(program.len(), 2);
}

#[test]
fn nesting_at_default_recursion_fuel_is_checked() {
    let depth = DEFAULT_RECURSION_FUEL as usize - 1;
    let source = format!("{}R : A -> B{}", "(".repeat(depth), ")".repeat(depth));

    let program = Query::expect_checked(&source);

    assert_eq!(last_relation(&program).name(), Some("R"));
}

#[test]
fn right_nested_composition_at_default_recursion_fuel_is_checked() {
    let depth = DEFAULT_RECURSION_FUEL as usize - 1;
    let source = format!(
        "{}R : A -> A{}",
        "R : A -> A ; (".repeat(depth),
        ")".repeat(depth)
    );

    let program = Query::expect_checked(&source);

    assert_eq!(
        last_relation(&program).dom_cod(),
        &dc(atom("A"), atom("A"))
    );
}

#[test]
fn nesting_past_default_recursion_fuel_is_fatal() {
    let depth = DEFAULT_RECURSION_FUEL as usize;
    let source = format!("{}R : A -> B{}", "(".repeat(depth), ")".repeat(depth));

    let err = Query::new(&source).exec().unwrap_err();

    assert!(matches!(err, Error::RecursionLimitExceeded));
}
