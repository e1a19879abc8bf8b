//! The layout engine: style registry, effective-style cache and tree walker.
//!
//! [`LayoutEngine::layout`] walks a subtree depth-first. Each node resolves
//! its own size, recurses into its in-flow children, arranges them with the
//! algorithm selected by `display`, optionally wraps them (`fitContent`) and
//! finally places its out-of-flow children.

use std::iter;

use tracing::{debug, trace};

use crate::config::LayoutConfig;
use crate::css::cascade::{cascade, EffectiveStyle, StyleCache};
use crate::css::properties::{AnchorTarget, Display, LayoutProperties, Position};
use crate::css::registry::{RegistryError, StyleClass, StyleRegistry};
use crate::css::value::{Length, StyleValue, UnitContext};
use crate::dom::NodeId;
use crate::geometry::{Rect, Size};
use crate::host::LayoutHost;

use super::axis::Axis;
use super::box_model::BoxModel;
use super::fit::{fit_size, FitParams};
use super::flex::{self, FlexContainer};
use super::grid::{self, GridContainer};
use super::item::LayoutItem;
use super::positioned;

/// Computes geometry for element trees owned by a [`LayoutHost`].
///
/// One engine holds the class registry and the per-element style cache for
/// one element population. Mutating the registry through the engine drops
/// the cached styles of every element that references the class.
pub struct LayoutEngine {
    registry: StyleRegistry,
    cache: StyleCache,
    config: LayoutConfig,
    empty: EffectiveStyle,
}

/// How a node takes part in the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Root,
    InFlow,
    OutOfFlow,
}

/// The content box of a container and the main axis it lays children on.
#[derive(Debug, Clone, Copy)]
struct Frame {
    content: Rect,
    main_axis: Option<Axis>,
}

/// A node's children, split by how they are placed.
#[derive(Debug, Default)]
struct Children {
    in_flow: Vec<NodeId>,
    out_of_flow: Vec<NodeId>,
    /// In-flow children sized by a percentage of this container.
    percent: Vec<NodeId>,
    /// Whether any in-flow child sets a flex property.
    has_flex: bool,
}

impl LayoutEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            registry: StyleRegistry::new(),
            cache: StyleCache::new(),
            config,
            empty: EffectiveStyle::default(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// Look up a registered class.
    pub fn class(&self, name: &str) -> Option<&StyleClass> {
        self.registry.get(name)
    }

    // -----------------------------------------------------------------------
    // Class registry
    // -----------------------------------------------------------------------

    /// Parse `text` and register it as class `name`, replacing any existing
    /// class of that name.
    pub fn register_class(&mut self, name: &str, text: &str) {
        self.registry.register(name, text);
        let invalidated = self.cache.invalidate_class(name);
        debug!(class = name, invalidated, "registered style class");
    }

    /// Set one property of a registered class. Text values are parsed like
    /// style text, so `"50% !important"` and `flex` shorthands work.
    pub fn set_class_property(
        &mut self,
        name: &str,
        property: &str,
        value: impl Into<StyleValue>,
    ) -> Result<(), RegistryError> {
        self.registry.set_property(name, property, value.into(), false)?;
        let invalidated = self.cache.invalidate_class(name);
        debug!(class = name, property, invalidated, "set class property");
        Ok(())
    }

    /// Remove one property from a registered class.
    pub fn remove_class_property(&mut self, name: &str, property: &str) -> Result<(), RegistryError> {
        self.registry.remove_property(name, property)?;
        let invalidated = self.cache.invalidate_class(name);
        debug!(class = name, property, invalidated, "removed class property");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Effective styles
    // -----------------------------------------------------------------------

    /// The effective style of `node`: its classes in list order, then its
    /// inline style, merged with `!important` precedence.
    ///
    /// The result is cached until the element's revision changes or one of
    /// its classes is mutated. Classes that are not registered contribute
    /// nothing.
    pub fn instance_style<H: LayoutHost + ?Sized>(&mut self, host: &H, node: NodeId) -> &EffectiveStyle {
        let Some(element) = host.element(node) else {
            return &self.empty;
        };
        let revision = element.revision();
        if self.cache.get(node, revision).is_none() {
            let registry = &self.registry;
            let style = cascade(
                element
                    .classes()
                    .iter()
                    .filter_map(|class| registry.get(class))
                    .map(StyleClass::style)
                    .chain(iter::once(element.style())),
            );
            self.cache.insert(node, revision, element.classes().to_vec(), style);
        }
        self.cache.get(node, revision).unwrap_or(&self.empty)
    }

    /// Drop the cached style of one element.
    pub fn invalidate(&mut self, node: NodeId) {
        self.cache.invalidate(node);
    }

    /// Drop every cached style.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    // -----------------------------------------------------------------------
    // Tree walk
    // -----------------------------------------------------------------------

    /// Run one full layout pass over the subtree rooted at `root`.
    ///
    /// The root is always treated as `position: relative`. Must not be
    /// interleaved with style mutation.
    pub fn layout<H: LayoutHost + ?Sized>(&mut self, host: &mut H, root: NodeId) {
        if !host.contains(root) {
            return;
        }
        let frame = host.parent(root).map(|parent| self.frame_of(host, parent));
        self.process(host, root, frame, Role::Root);
    }

    fn process<H: LayoutHost + ?Sized>(&mut self, host: &mut H, node: NodeId, parent: Option<Frame>, role: Role) {
        let angle = host.angle(node);
        if angle != 0.0 {
            host.set_angle(node, 0.0);
        }

        let basis = parent.map_or(0.0, |frame| frame.content.width);
        let (mut props, box_model) = self.resolve(host, node, basis);
        if role == Role::Root {
            props.position = Position::Relative;
        }
        self.apply_size(host, node, &props, parent);

        let children = self.partition(host, node);
        trace!(
            ?node,
            display = ?props.display,
            in_flow = children.in_flow.len(),
            out_of_flow = children.out_of_flow.len(),
            "layout node"
        );

        let own = frame(host, node, &props, &box_model);
        for &child in &children.in_flow {
            self.process(host, child, Some(own), Role::InFlow);
        }

        if props.fit_content {
            self.fit(host, node, &props, &box_model, &children.in_flow);
        }
        if role == Role::OutOfFlow {
            self.position(host, node, &props, &box_model, parent);
        }

        if props.display != Display::None {
            self.arrange(host, node, &props, &box_model, &children.in_flow);
            if props.fit_content {
                self.refit(host, node, &props, &box_model, &children);
            }
        }

        let own = frame(host, node, &props, &box_model);
        for &child in &children.out_of_flow {
            self.process(host, child, Some(own), Role::OutOfFlow);
        }

        if angle != 0.0 {
            host.set_angle(node, angle);
        }
    }

    /// Fit-content second step: wrap the arranged children and re-run the
    /// axis algorithm at most once.
    fn refit<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        node: NodeId,
        props: &LayoutProperties,
        box_model: &BoxModel,
        children: &Children,
    ) {
        let changed = self.fit(host, node, props, box_model, &children.in_flow);
        if !children.percent.is_empty() {
            let own = frame(host, node, props, box_model);
            for &child in &children.percent {
                let (child_props, _) = self.resolve(host, child, own.content.width);
                self.apply_size(host, child, &child_props, Some(own));
            }
        } else if !children.has_flex && !changed {
            return;
        }
        self.arrange(host, node, props, box_model, &children.in_flow);
    }

    fn resolve<H: LayoutHost + ?Sized>(&mut self, host: &H, node: NodeId, basis: f32) -> (LayoutProperties, BoxModel) {
        let units = self.units();
        let style = self.instance_style(host, node);
        (LayoutProperties::from_style(style), BoxModel::resolve(style, basis, &units))
    }

    fn units(&self) -> UnitContext {
        UnitContext::from(&self.config)
    }

    /// Container frame of a node outside the walked subtree (the root's parent).
    fn frame_of<H: LayoutHost + ?Sized>(&mut self, host: &H, node: NodeId) -> Frame {
        let basis = host.parent(node).map_or(0.0, |p| host.geometry(p).width);
        let (props, box_model) = self.resolve(host, node, basis);
        frame(host, node, &props, &box_model)
    }

    /// Apply explicit width/height, flex-basis along the parent's main axis,
    /// percentages of the parent's content box, then min/max clamps.
    fn apply_size<H: LayoutHost + ?Sized>(
        &self,
        host: &mut H,
        node: NodeId,
        props: &LayoutProperties,
        parent: Option<Frame>,
    ) {
        let units = self.units();
        let basis = parent.map(|frame| frame.content.size());
        let width_basis = basis.map(|b| b.width);
        let height_basis = basis.map(|b| b.height);

        let mut width = resolve_length(props.width, width_basis, &units);
        let mut height = resolve_length(props.height, height_basis, &units);
        if let Some(axis) = parent.and_then(|frame| frame.main_axis) {
            let flex_basis = resolve_length(props.flex_basis, basis.map(|b| axis.size(b)), &units);
            if let Some(flex_basis) = flex_basis {
                match axis {
                    Axis::Horizontal => width = Some(flex_basis),
                    Axis::Vertical => height = Some(flex_basis),
                }
            }
        }

        let current = host.geometry(node);
        let width = clamp(
            width.unwrap_or(current.width),
            resolve_length(props.min_width, width_basis, &units),
            resolve_length(props.max_width, width_basis, &units),
        );
        let height = clamp(
            height.unwrap_or(current.height),
            resolve_length(props.min_height, height_basis, &units),
            resolve_length(props.max_height, height_basis, &units),
        );
        if width != current.width {
            host.set_width(node, width);
        }
        if height != current.height {
            host.set_height(node, height);
        }
    }

    /// Split children into in-flow and out-of-flow, skipping invisible and
    /// layout-disabled ones.
    fn partition<H: LayoutHost + ?Sized>(&mut self, host: &H, node: NodeId) -> Children {
        let mut children = Children::default();
        for child in host.children(node) {
            let enabled = host.element(child).is_none_or(|ui| ui.enabled());
            if !host.is_visible(child) || !enabled {
                continue;
            }
            let props = LayoutProperties::from_style(self.instance_style(host, child));
            if props.position.is_out_of_flow() {
                children.out_of_flow.push(child);
                continue;
            }
            if props.uses_percent() {
                children.percent.push(child);
            }
            children.has_flex |= props.has_flex;
            children.in_flow.push(child);
        }
        children
    }

    /// Build the per-child inputs of the flow algorithms from current geometry.
    fn measure<H: LayoutHost + ?Sized>(&mut self, host: &H, children: &[NodeId], own: Frame) -> Vec<LayoutItem> {
        let units = self.units();
        let content = own.content.size();
        let (width_basis, height_basis) = (Some(content.width), Some(content.height));

        children
            .iter()
            .map(|&child| {
                let (props, box_model) = self.resolve(host, child, content.width);
                let length = |l: Option<Length>, basis: Option<f32>| resolve_length(l, basis, &units);
                let item = LayoutItem {
                    size: host.bounding_box(child).size(),
                    margin: box_model.margin,
                    flex_grow: props.flex_grow,
                    flex_shrink: props.flex_shrink,
                    flex_basis: own
                        .main_axis
                        .and_then(|axis| length(props.flex_basis, Some(axis.size(content)))),
                    min: Size::new(
                        length(props.min_width, width_basis).unwrap_or(0.0),
                        length(props.min_height, height_basis).unwrap_or(0.0),
                    ),
                    max: Size::new(
                        length(props.max_width, width_basis).unwrap_or(f32::INFINITY),
                        length(props.max_height, height_basis).unwrap_or(f32::INFINITY),
                    ),
                    align_self: props.align_self,
                    justify_self: props.justify_self,
                    explicit_width: props.width.is_some(),
                    explicit_height: props.height.is_some(),
                };
                // Rotated children are placed by their bounding box but keep
                // their unrotated size.
                if host.angle(child) != 0.0 {
                    item.rigid()
                } else {
                    item
                }
            })
            .collect()
    }

    /// Row and column gaps of a container: `rowGap`/`columnGap`, falling back to `gap`.
    fn gaps(&self, props: &LayoutProperties, content: Rect) -> (f32, f32) {
        let units = self.units();
        let row = resolve_length(props.row_gap.or(props.gap), Some(content.height), &units);
        let column = resolve_length(props.column_gap.or(props.gap), Some(content.width), &units);
        (row.unwrap_or(0.0), column.unwrap_or(0.0))
    }

    /// Run the axis algorithm selected by `display` over `in_flow`.
    fn arrange<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        node: NodeId,
        props: &LayoutProperties,
        box_model: &BoxModel,
        in_flow: &[NodeId],
    ) {
        if in_flow.is_empty() {
            return;
        }
        let own = frame(host, node, props, box_model);
        let items = self.measure(host, in_flow, own);
        let (row_gap, column_gap) = self.gaps(props, own.content);

        let rects = match (props.display, own.main_axis) {
            (Display::Grid, _) => grid::arrange(
                &GridContainer {
                    content: own.content,
                    columns: props.grid_columns.unwrap_or(self.config.default_grid_columns),
                    column_gap,
                    row_gap,
                    justify: props.justify_content,
                    align: props.align_items,
                },
                &items,
            ),
            (_, Some(axis)) => {
                let (main_gap, cross_gap) = match axis {
                    Axis::Vertical => (row_gap, column_gap),
                    Axis::Horizontal => (column_gap, row_gap),
                };
                flex::arrange(
                    &FlexContainer {
                        content: own.content,
                        axis,
                        reverse: props.display.is_reverse(),
                        main_gap,
                        cross_gap,
                        justify: props.justify_content,
                        align: props.align_items,
                        wrap: props.flex_wrap,
                    },
                    &items,
                    &self.config,
                )
            }
            (_, None) => return,
        };

        for ((&child, item), rect) in in_flow.iter().zip(&items).zip(rects) {
            place(host, child, item.size, rect);
        }
    }

    /// Resize `node` to wrap its in-flow children. Returns whether the size changed.
    fn fit<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        node: NodeId,
        props: &LayoutProperties,
        box_model: &BoxModel,
        in_flow: &[NodeId],
    ) -> bool {
        let own = frame(host, node, props, box_model);
        let items = self.measure(host, in_flow, own);
        let (row_gap, column_gap) = self.gaps(props, own.content);
        let params = FitParams {
            display: props.display,
            main_gap: if own.main_axis == Some(Axis::Vertical) { row_gap } else { column_gap },
            row_gap,
            columns: props.grid_columns.unwrap_or(self.config.default_grid_columns),
            frame: box_model.frame(),
        };
        let Some(size) = fit_size(&params, &items) else {
            return false;
        };

        let current = host.geometry(node).size();
        if size.width != current.width {
            host.set_width(node, size.width);
        }
        if size.height != current.height {
            host.set_height(node, size.height);
        }
        size != current
    }

    /// Place an out-of-flow node against its container or anchor target.
    fn position<H: LayoutHost + ?Sized>(
        &self,
        host: &mut H,
        node: NodeId,
        props: &LayoutProperties,
        box_model: &BoxModel,
        parent: Option<Frame>,
    ) {
        let size = host.geometry(node).size();
        let (x, y) = match props.position {
            Position::Relative => return,
            Position::Absolute => {
                let Some(parent) = parent else {
                    return;
                };
                positioned::absolute(props, box_model.margin, size, parent.content, &self.units())
            }
            Position::Anchor => {
                let Some(target) = anchor_target(host, node, &props.anchor_target) else {
                    debug!(?node, target = ?props.anchor_target, "anchor target not found");
                    return;
                };
                positioned::anchor(props, host.bounding_box(target), size)
            }
        };
        host.set_x(node, x);
        host.set_y(node, y);
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn frame<H: LayoutHost + ?Sized>(host: &H, node: NodeId, props: &LayoutProperties, box_model: &BoxModel) -> Frame {
    Frame {
        content: box_model.content_box(host.geometry(node)),
        main_axis: main_axis(props.display),
    }
}

fn main_axis(display: Display) -> Option<Axis> {
    match display {
        Display::Column | Display::ColumnReverse => Some(Axis::Vertical),
        Display::Row | Display::RowReverse => Some(Axis::Horizontal),
        Display::Grid | Display::None => None,
    }
}

/// Resolve a length; percentages need a basis, everything else does not.
fn resolve_length(length: Option<Length>, basis: Option<f32>, units: &UnitContext) -> Option<f32> {
    let length = length?;
    if length.is_percent() {
        length.resolve(basis?, units)
    } else {
        length.resolve(0.0, units)
    }
}

/// Clamp to `[min, max]`; `min` wins when they conflict.
fn clamp(value: f32, min: Option<f32>, max: Option<f32>) -> f32 {
    let value = max.map_or(value, |max| value.min(max));
    min.map_or(value, |min| value.max(min))
}

fn anchor_target<H: LayoutHost + ?Sized>(host: &H, node: NodeId, target: &AnchorTarget) -> Option<NodeId> {
    match target {
        AnchorTarget::Parent => host.parent(node),
        AnchorTarget::Tag(tag) => host.find_tagged(tag),
        AnchorTarget::Node(id) => host.contains(*id).then_some(*id),
    }
}

/// Write a computed border box back to the host. `measured` is the bounding
/// box size the algorithm started from; only changed extents are written.
fn place<H: LayoutHost + ?Sized>(host: &mut H, node: NodeId, measured: Size, rect: Rect) {
    if rect.width != measured.width {
        host.set_width(node, rect.width);
    }
    if rect.height != measured.height {
        host.set_height(node, rect.height);
    }
    let geometry = host.geometry(node);
    let bounds = host.bounding_box(node);
    host.set_x(node, geometry.x + rect.x - bounds.x);
    host.set_y(node, geometry.y + rect.y - bounds.y);
}
