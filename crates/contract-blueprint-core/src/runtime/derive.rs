// crates/contract-blueprint-core/src/runtime/derive.rs
// ============================================================================
// Module: Recursive Derivation Engine
// Description: Depth-first derivation of registry definitions from root types.
// Purpose: Derive each reachable type exactly once with stable identifiers.
// Dependencies: crate::core, crate::interfaces, crate::runtime::{registry, resolver}
// ============================================================================

//! ## Overview
//! A [`DerivationSession`] walks the type graph depth-first from the roots,
//! keeping pending types on an explicit work stack. Each type key is marked
//! visited and its id reserved before the types it references are entered, so
//! a self-referential field resolves to a `$ref` to the definition still being
//! built. The finished node is merged with caller annotations and written to
//! the registry only after its whole subtree is done.
//!
//! Invariants:
//! - One definition per type key; a second encounter reuses the reserved id.
//! - Two distinct keys reserving one id fail with
//!   [`BlueprintError::DuplicateDefinitionId`] before either is recursed into.
//! - Constructor fields keep declaration order.
//! - Derivation fails closed on the definition and depth limits.
//! - A bare alias chain that returns to one of its members is rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::core::annotation::AnnotationTable;
use crate::core::annotation::merge_annotation;
use crate::core::blueprint::Definitions;
use crate::core::error::BlueprintError;
use crate::core::identifiers::DefinitionId;
use crate::core::schema::Annotation;
use crate::core::schema::SchemaKind;
use crate::core::schema::SchemaNode;
use crate::core::types::ConstructorDecl;
use crate::core::types::TypeDeclaration;
use crate::core::types::TypeKey;
use crate::core::types::TypeRef;
use crate::core::types::TypeShape;
use crate::core::types::TypeUniverse;
use crate::interfaces::DefinitionEvent;
use crate::interfaces::DerivationObserver;
use crate::runtime::registry::DefinitionRegistry;
use crate::runtime::resolver::DefinitionSink;
use crate::runtime::resolver::ReferenceResolver;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Default maximum number of definitions per derivation.
pub const DEFAULT_MAX_DEFINITIONS: usize = 4096;

/// Default maximum nesting depth of named types.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Derivation tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationOptions {
    /// Title each sum constructor with its constructor name.
    pub constructor_titles: bool,
    /// Title constructor fields with their declared field names.
    pub field_titles: bool,
    /// Maximum number of definitions one derivation may produce.
    pub max_definitions: usize,
    /// Maximum nesting depth of named types.
    pub max_depth: usize,
}

impl Default for DerivationOptions {
    fn default() -> Self {
        Self {
            constructor_titles: true,
            field_titles: false,
            max_definitions: DEFAULT_MAX_DEFINITIONS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

// ============================================================================
// SECTION: Work Stack
// ============================================================================

/// Definition whose node is built while the types it references are pending.
struct Frame {
    /// Type being derived.
    key: TypeKey,
    /// Reserved identifier.
    id: DefinitionId,
    /// Unannotated node; its `$ref`s already point at their final ids.
    node: SchemaNode,
    /// Named types the node references, in field order.
    children: std::vec::IntoIter<TypeKey>,
}

/// Sink that answers with declared ids and records every requested key.
struct ChildCollector<'a> {
    /// Declared types.
    universe: &'a TypeUniverse,
    /// Requested keys in resolution order.
    children: Vec<TypeKey>,
}

impl<'a> ChildCollector<'a> {
    /// Creates an empty collector over `universe`.
    const fn new(universe: &'a TypeUniverse) -> Self {
        Self {
            universe,
            children: Vec::new(),
        }
    }
}

impl DefinitionSink for ChildCollector<'_> {
    fn definition_for(&mut self, key: &TypeKey) -> Result<DefinitionId, BlueprintError> {
        let declaration =
            self.universe.get(key).ok_or_else(|| BlueprintError::UndeclaredType(key.clone()))?;
        self.children.push(key.clone());
        Ok(declaration.definition_id())
    }
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// One derivation pass over a closed set of roots.
///
/// # Invariants
/// - `visited` and `reserved` are updated together, before a type's
///   referenced types are entered.
/// - Nesting is tracked on an explicit stack; native recursion depth does not
///   grow with the type graph.
/// - The registry is owned by this session and consumed by [`Self::finish`].
pub struct DerivationSession<'a> {
    /// Declared types.
    universe: &'a TypeUniverse,
    /// Caller-supplied annotations.
    annotations: &'a AnnotationTable,
    /// Tuning knobs.
    options: DerivationOptions,
    /// Event sink.
    observer: &'a dyn DerivationObserver,
    /// Closed-world resolver.
    resolver: ReferenceResolver<'a>,
    /// Ids assigned to visited keys.
    visited: BTreeMap<TypeKey, DefinitionId>,
    /// Keys holding each reserved id.
    reserved: BTreeMap<DefinitionId, TypeKey>,
    /// Finished definitions.
    registry: DefinitionRegistry,
}

impl<'a> DerivationSession<'a> {
    /// Creates a session over `universe`, restricted to `reachable`.
    #[must_use]
    pub fn new(
        universe: &'a TypeUniverse,
        reachable: &'a BTreeSet<TypeKey>,
        annotations: &'a AnnotationTable,
        options: DerivationOptions,
        observer: &'a dyn DerivationObserver,
    ) -> Self {
        Self {
            universe,
            annotations,
            options,
            observer,
            resolver: ReferenceResolver::new(reachable),
            visited: BTreeMap::new(),
            reserved: BTreeMap::new(),
            registry: DefinitionRegistry::new(),
        }
    }

    /// Derives a root type and returns its definition id.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::UnreferencedType`] when `key` is outside the
    /// reachable set, or any derivation error for its subtree.
    pub fn derive_root(&mut self, key: &TypeKey) -> Result<DefinitionId, BlueprintError> {
        self.resolver.check_reachable(key)?;
        self.derive(key)
    }

    /// Resolves a type reference, deriving any named types it mentions.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError`] when resolution or derivation fails.
    pub fn resolve(&mut self, ty: &TypeRef) -> Result<SchemaNode, BlueprintError> {
        let mut collector = ChildCollector::new(self.universe);
        let node = self.resolver.resolve(ty, &mut collector)?;
        for key in &collector.children {
            self.derive(key)?;
        }
        Ok(node)
    }

    /// Finalizes the registry.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::DanglingReference`] when a definition points
    /// at an id that was never registered.
    pub fn finish(self) -> Result<Definitions, BlueprintError> {
        self.registry.finalize()
    }

    /// Derives `root` and everything it references; later calls return the
    /// reserved id.
    fn derive(&mut self, root: &TypeKey) -> Result<DefinitionId, BlueprintError> {
        if let Some(id) = self.visited.get(root) {
            self.observer.definition_reused(DefinitionEvent {
                id,
                type_key: root,
                depth: 0,
            });
            return Ok(id.clone());
        }
        let mut stack = Vec::new();
        let id = self.enter(root, &mut stack)?;
        while let Some(frame) = stack.last_mut() {
            match frame.children.next() {
                Some(child) => self.visit(&child, &mut stack)?,
                None => self.complete(&mut stack)?,
            }
        }
        Ok(id)
    }

    /// Reuses a visited child or enters it on top of `stack`.
    fn visit(&mut self, key: &TypeKey, stack: &mut Vec<Frame>) -> Result<(), BlueprintError> {
        if let Some(id) = self.visited.get(key) {
            self.observer.definition_reused(DefinitionEvent {
                id,
                type_key: key,
                depth: stack.len(),
            });
            return Ok(());
        }
        self.enter(key, stack)?;
        Ok(())
    }

    /// Checks limits, reserves the id, builds the node, and pushes its frame.
    fn enter(
        &mut self,
        key: &TypeKey,
        stack: &mut Vec<Frame>,
    ) -> Result<DefinitionId, BlueprintError> {
        let universe = self.universe;
        let declaration =
            universe.get(key).ok_or_else(|| BlueprintError::UndeclaredType(key.clone()))?;
        if stack.len() >= self.options.max_depth {
            return Err(BlueprintError::DepthLimitExceeded {
                limit: self.options.max_depth,
                type_key: key.clone(),
            });
        }
        if self.visited.len() >= self.options.max_definitions {
            return Err(BlueprintError::DefinitionLimitExceeded {
                limit: self.options.max_definitions,
            });
        }
        self.check_alias_chain(declaration)?;
        let id = self.reserve(key, declaration)?;

        let mut collector = ChildCollector::new(universe);
        let node = self.build(key, &declaration.shape, &mut collector)?;
        stack.push(Frame {
            key: key.clone(),
            id: id.clone(),
            node,
            children: collector.children.into_iter(),
        });
        Ok(id)
    }

    /// Pops the finished top frame, annotates it, and registers it.
    fn complete(&mut self, stack: &mut Vec<Frame>) -> Result<(), BlueprintError> {
        let Some(frame) = stack.pop() else {
            return Ok(());
        };
        let node = self.annotate(&frame.key, frame.node)?;
        self.registry.register(frame.id.clone(), &frame.key, node)?;
        self.observer.definition_registered(DefinitionEvent {
            id: &frame.id,
            type_key: &frame.key,
            depth: stack.len(),
        });
        Ok(())
    }

    /// Rejects a chain of bare aliases that leads back to one of its members.
    fn check_alias_chain(&self, declaration: &TypeDeclaration) -> Result<(), BlueprintError> {
        let mut chain = BTreeSet::from([&declaration.key]);
        let mut shape = &declaration.shape;
        while let TypeShape::Alias(TypeRef::Named(next)) = shape {
            if !chain.insert(next) {
                return Err(BlueprintError::AliasCycle(next.clone()));
            }
            let Some(target) = self.universe.get(next) else {
                break;
            };
            shape = &target.shape;
        }
        Ok(())
    }

    /// Marks `key` visited and reserves its id.
    fn reserve(
        &mut self,
        key: &TypeKey,
        declaration: &TypeDeclaration,
    ) -> Result<DefinitionId, BlueprintError> {
        let id = declaration.definition_id();
        if let Some(existing) = self.reserved.get(&id) {
            return Err(BlueprintError::DuplicateDefinitionId {
                id,
                existing: existing.to_string(),
                incoming: key.to_string(),
            });
        }
        self.reserved.insert(id.clone(), key.clone());
        self.visited.insert(key.clone(), id.clone());
        Ok(id)
    }

    /// Builds the unannotated node for a declared shape.
    ///
    /// Named types resolve to `$ref`s and are recorded in `children`.
    fn build(
        &self,
        key: &TypeKey,
        shape: &TypeShape,
        children: &mut ChildCollector<'_>,
    ) -> Result<SchemaNode, BlueprintError> {
        match shape {
            TypeShape::Alias(target) => self.resolver.resolve(target, children),
            TypeShape::BoundedInteger(bounds) => Ok(SchemaNode::new(SchemaKind::Integer(*bounds))),
            TypeShape::BoundedBytes(bounds) => Ok(SchemaNode::new(SchemaKind::Bytes(*bounds))),
            TypeShape::BoundedList {
                items,
                bounds,
            } => {
                let items = self.resolver.resolve(items, children)?;
                Ok(SchemaNode::new(SchemaKind::List {
                    items: Box::new(items),
                    bounds: *bounds,
                }))
            }
            TypeShape::Record(constructor) => {
                self.constructor(constructor, constructor.index.unwrap_or(0), children)
            }
            TypeShape::Sum(constructors) => {
                let mut seen = BTreeSet::new();
                let mut alternatives = Vec::with_capacity(constructors.len());
                for (position, constructor) in (0_u64 ..).zip(constructors) {
                    let index = constructor.index.unwrap_or(position);
                    if !seen.insert(index) {
                        return Err(BlueprintError::DuplicateConstructorIndex {
                            type_key: key.clone(),
                            index,
                        });
                    }
                    let mut alternative = self.constructor(constructor, index, children)?;
                    if self.options.constructor_titles {
                        alternative.annotation.title = Some(constructor.name.clone());
                    }
                    alternatives.push(alternative);
                }
                Ok(SchemaNode::one_of(alternatives))
            }
        }
    }

    /// Builds a constructor node with fields in declaration order.
    fn constructor(
        &self,
        constructor: &ConstructorDecl,
        index: u64,
        children: &mut ChildCollector<'_>,
    ) -> Result<SchemaNode, BlueprintError> {
        let mut fields = Vec::with_capacity(constructor.fields.len());
        for field in &constructor.fields {
            let mut node = self.resolver.resolve(&field.ty, children)?;
            if self.options.field_titles
                && let Some(name) = &field.name
            {
                node = node.annotated(&Annotation::titled(name.clone()));
            }
            fields.push(node);
        }
        Ok(SchemaNode::constructor(index, fields))
    }

    /// Applies the type-level and each constructor-level annotation.
    fn annotate(&self, key: &TypeKey, node: SchemaNode) -> Result<SchemaNode, BlueprintError> {
        let mut node = merge_annotation(key, node, self.annotations.for_type(key), None)?;
        for (index, annotation) in self.annotations.for_constructors(key) {
            node = merge_annotation(key, node, None, Some((index, annotation)))?;
        }
        Ok(node)
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Derives the definitions reachable from `roots`.
///
/// # Errors
///
/// Returns [`BlueprintError`] when a root is undeclared, identifiers
/// collide, an annotation is misplaced, or a limit is exceeded. No partial
/// registry is returned on failure.
pub fn derive_definitions(
    universe: &TypeUniverse,
    roots: &[TypeKey],
    annotations: &AnnotationTable,
    options: DerivationOptions,
    observer: &dyn DerivationObserver,
) -> Result<Definitions, BlueprintError> {
    let reachable = universe.reachable_from(roots)?;
    let mut session = DerivationSession::new(universe, &reachable, annotations, options, observer);
    for root in roots {
        session.derive_root(root)?;
    }
    session.finish()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
