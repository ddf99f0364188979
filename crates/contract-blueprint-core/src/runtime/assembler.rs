// crates/contract-blueprint-core/src/runtime/assembler.rs
// ============================================================================
// Module: Blueprint Assembler
// Description: Combines derived definitions with validator metadata.
// Purpose: Produce one immutable, internally consistent contract blueprint.
// Dependencies: crate::core, crate::interfaces, crate::runtime::derive, serde
// ============================================================================

//! ## Overview
//! The assembler takes an explicit list of root types (the closed world), the
//! validator declarations, and the preamble. It derives every root, resolves
//! each argument and parameter type against the same session, finalizes the
//! registry, and checks that every argument `$ref` lands in it.
//!
//! Invariants:
//! - Validators are emitted ordered by title, then redeemer purposes.
//! - Every argument and parameter declares at least one purpose.
//! - With [`ValidatorUniqueness::Reject`], no two validators share a title
//!   and redeemer purpose set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::annotation::AnnotationTable;
use crate::core::blueprint::ArgumentBlueprint;
use crate::core::blueprint::CompiledValidator;
use crate::core::blueprint::ContractBlueprint;
use crate::core::blueprint::Definitions;
use crate::core::blueprint::ParameterBlueprint;
use crate::core::blueprint::Preamble;
use crate::core::blueprint::Purpose;
use crate::core::blueprint::PurposeSet;
use crate::core::blueprint::ValidatorBlueprint;
use crate::core::error::BlueprintError;
use crate::core::types::TypeKey;
use crate::core::types::TypeRef;
use crate::core::types::TypeUniverse;
use crate::interfaces::AssemblySummary;
use crate::interfaces::DerivationObserver;
use crate::interfaces::NoopObserver;
use crate::runtime::derive::DerivationOptions;
use crate::runtime::derive::DerivationSession;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Policy for validators sharing a title and redeemer purpose set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorUniqueness {
    /// Fail assembly with [`BlueprintError::DuplicateValidator`].
    #[default]
    Reject,
    /// Keep both validators.
    Allow,
}

/// Assembly options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// Duplicate validator policy.
    pub validator_uniqueness: ValidatorUniqueness,
    /// Derivation options for the embedded session.
    pub derivation: DerivationOptions,
}

// ============================================================================
// SECTION: Declarations
// ============================================================================

/// Redeemer, datum, or parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDecl {
    /// Optional title.
    pub title: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Purposes the argument applies to.
    pub purposes: PurposeSet,
    /// Argument type.
    pub ty: TypeRef,
}

impl ArgumentDecl {
    /// Argument of type `ty` for the given purposes.
    #[must_use]
    pub const fn new(purposes: PurposeSet, ty: TypeRef) -> Self {
        Self {
            title: None,
            description: None,
            purposes,
            ty,
        }
    }

    /// Argument of type `ty` for a single purpose.
    #[must_use]
    pub fn single(purpose: Purpose, ty: TypeRef) -> Self {
        Self::new(PurposeSet::single(purpose), ty)
    }

    /// Returns the argument with a title.
    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns the argument with a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Validator declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorDecl {
    /// Validator title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Redeemer argument.
    pub redeemer: ArgumentDecl,
    /// Datum argument.
    pub datum: Option<ArgumentDecl>,
    /// Parameters in application order.
    pub parameters: Vec<ArgumentDecl>,
    /// Compiled code.
    pub compiled: Option<CompiledValidator>,
}

impl ValidatorDecl {
    /// Validator with a redeemer and nothing else.
    #[must_use]
    pub fn new(title: impl Into<String>, redeemer: ArgumentDecl) -> Self {
        Self {
            title: title.into(),
            description: None,
            redeemer,
            datum: None,
            parameters: Vec::new(),
            compiled: None,
        }
    }

    /// Returns the validator with a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the validator with a datum.
    #[must_use]
    pub fn with_datum(mut self, datum: ArgumentDecl) -> Self {
        self.datum = Some(datum);
        self
    }

    /// Returns the validator with one more parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ArgumentDecl) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Returns the validator with compiled code.
    #[must_use]
    pub fn with_compiled(mut self, compiled: CompiledValidator) -> Self {
        self.compiled = Some(compiled);
        self
    }

    /// Visits every argument with a diagnostic label.
    fn for_each_argument(&self, mut visit: impl FnMut(String, &ArgumentDecl)) {
        visit(format!("{}.redeemer", self.title), &self.redeemer);
        if let Some(datum) = &self.datum {
            visit(format!("{}.datum", self.title), datum);
        }
        for (position, parameter) in self.parameters.iter().enumerate() {
            visit(format!("{}.parameters[{position}]", self.title), parameter);
        }
    }
}

// ============================================================================
// SECTION: Assembler
// ============================================================================

/// Builder that assembles a [`ContractBlueprint`].
pub struct BlueprintAssembler<'a> {
    /// Optional `$id`.
    id: Option<String>,
    /// Contract metadata.
    preamble: Preamble,
    /// Declared types.
    universe: &'a TypeUniverse,
    /// Closed root set.
    roots: Vec<TypeKey>,
    /// Caller annotations.
    annotations: AnnotationTable,
    /// Validator declarations.
    validators: Vec<ValidatorDecl>,
    /// Assembly options.
    options: AssemblerOptions,
    /// Event sink.
    observer: &'a dyn DerivationObserver,
}

impl<'a> BlueprintAssembler<'a> {
    /// Creates an assembler over `universe` with no roots or validators.
    #[must_use]
    pub fn new(preamble: Preamble, universe: &'a TypeUniverse) -> Self {
        Self {
            id: None,
            preamble,
            universe,
            roots: Vec::new(),
            annotations: AnnotationTable::new(),
            validators: Vec::new(),
            options: AssemblerOptions::default(),
            observer: &NoopObserver,
        }
    }

    /// Sets the blueprint `$id`.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a root type.
    #[must_use]
    pub fn with_root(mut self, key: TypeKey) -> Self {
        self.roots.push(key);
        self
    }

    /// Adds several root types.
    #[must_use]
    pub fn with_roots(mut self, keys: impl IntoIterator<Item = TypeKey>) -> Self {
        self.roots.extend(keys);
        self
    }

    /// Replaces the annotation table.
    #[must_use]
    pub fn with_annotations(mut self, annotations: AnnotationTable) -> Self {
        self.annotations = annotations;
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn with_validator(mut self, validator: ValidatorDecl) -> Self {
        self.validators.push(validator);
        self
    }

    /// Replaces the assembly options.
    #[must_use]
    pub const fn with_options(mut self, options: AssemblerOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the observer.
    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn DerivationObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Assembles the blueprint.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError`] when an argument has no purposes, validators
    /// collide under [`ValidatorUniqueness::Reject`], an argument names a
    /// type outside the roots, or derivation fails.
    pub fn assemble(self) -> Result<ContractBlueprint, BlueprintError> {
        self.check_purposes()?;
        if self.options.validator_uniqueness == ValidatorUniqueness::Reject {
            self.check_uniqueness()?;
        }

        let reachable = self.universe.reachable_from(&self.roots)?;
        let mut session = DerivationSession::new(
            self.universe,
            &reachable,
            &self.annotations,
            self.options.derivation,
            self.observer,
        );
        for root in &self.roots {
            session.derive_root(root)?;
        }
        let mut validators = Vec::with_capacity(self.validators.len());
        for validator in &self.validators {
            validators.push(build_validator(&mut session, validator)?);
        }
        let definitions = session.finish()?;
        check_argument_references(&validators, &definitions)?;
        validators.sort_by(|left, right| {
            left.title
                .cmp(&right.title)
                .then_with(|| left.redeemer.purposes.cmp(&right.redeemer.purposes))
        });

        self.observer.blueprint_assembled(AssemblySummary {
            title: &self.preamble.title,
            validators: validators.len(),
            definitions: definitions.len(),
        });
        Ok(ContractBlueprint {
            id: self.id,
            preamble: self.preamble,
            validators,
            definitions,
        })
    }

    /// Rejects arguments without purposes.
    fn check_purposes(&self) -> Result<(), BlueprintError> {
        let mut empty = None;
        for validator in &self.validators {
            validator.for_each_argument(|label, argument| {
                if empty.is_none() && argument.purposes.is_empty() {
                    empty = Some(label);
                }
            });
        }
        match empty {
            Some(label) => Err(BlueprintError::EmptyPurposeSet(label)),
            None => Ok(()),
        }
    }

    /// Rejects validators sharing a title and redeemer purpose set.
    fn check_uniqueness(&self) -> Result<(), BlueprintError> {
        let mut seen = BTreeSet::new();
        for validator in &self.validators {
            if !seen.insert((&validator.title, &validator.redeemer.purposes)) {
                let purposes: Vec<&str> =
                    validator.redeemer.purposes.iter().map(Purpose::as_str).collect();
                return Err(BlueprintError::DuplicateValidator(format!(
                    "{} ({})",
                    validator.title,
                    purposes.join(", ")
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves one validator declaration against the session.
fn build_validator(
    session: &mut DerivationSession<'_>,
    validator: &ValidatorDecl,
) -> Result<ValidatorBlueprint, BlueprintError> {
    let redeemer = build_argument(session, &validator.redeemer)?;
    let datum =
        validator.datum.as_ref().map(|datum| build_argument(session, datum)).transpose()?;
    let mut parameters = Vec::with_capacity(validator.parameters.len());
    for parameter in &validator.parameters {
        let argument = build_argument(session, parameter)?;
        parameters.push(ParameterBlueprint {
            title: argument.title,
            description: argument.description,
            purposes: argument.purposes,
            schema: argument.schema,
        });
    }
    Ok(ValidatorBlueprint {
        title: validator.title.clone(),
        description: validator.description.clone(),
        redeemer,
        datum,
        parameters,
        compiled: validator.compiled.clone(),
    })
}

/// Resolves one argument declaration against the session.
fn build_argument(
    session: &mut DerivationSession<'_>,
    argument: &ArgumentDecl,
) -> Result<ArgumentBlueprint, BlueprintError> {
    Ok(ArgumentBlueprint {
        title: argument.title.clone(),
        description: argument.description.clone(),
        purposes: argument.purposes.clone(),
        schema: session.resolve(&argument.ty)?,
    })
}

/// Verifies every argument `$ref` targets a finalized definition.
fn check_argument_references(
    validators: &[ValidatorBlueprint],
    definitions: &Definitions,
) -> Result<(), BlueprintError> {
    let mut dangling = None;
    for validator in validators {
        validator.for_each_schema(|label, schema| {
            schema.for_each_reference(&mut |target| {
                if dangling.is_none() && !definitions.contains(target) {
                    dangling = Some(BlueprintError::DanglingReference {
                        from: label.clone(),
                        target: target.clone(),
                    });
                }
            });
        });
    }
    match dangling {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
