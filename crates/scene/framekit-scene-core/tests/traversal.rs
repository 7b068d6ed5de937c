use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use framekit_animation_core::InterpolationMode;
use framekit_api_core::Vec2;
use framekit_scene_core::{
    AnimatableProperty, Behaviour, BehaviourContext, DeferredAction, DynamicObject, FrameContext,
    NodeId, Placement, SceneGraph, SceneNode,
};

type Visits = Rc<RefCell<Vec<&'static str>>>;

struct Recorder {
    name: &'static str,
    visits: Visits,
    remove: Option<NodeId>,
}

impl Behaviour for Recorder {
    fn update_object_state(&mut self, _: &mut DynamicObject, ctx: &mut BehaviourContext<'_>) {
        self.visits.borrow_mut().push(self.name);
        if let Some(node) = self.remove.take() {
            ctx.defer(DeferredAction::Remove {
                node,
                instant: true,
            });
        }
    }
}

fn frame(delta: f32) -> FrameContext {
    let mut ctx = FrameContext::with_seed(Vec2::new(320.0, 240.0), 1);
    ctx.set_delta(delta);
    ctx
}

fn step(graph: &mut SceneGraph, ctx: &mut FrameContext) {
    graph.update(ctx);
    for action in ctx.take_deferred() {
        graph.apply(action, ctx).unwrap();
    }
}

#[test]
fn removal_during_traversal_is_seen_next_frame() {
    let visits: Visits = Rc::default();
    let mut graph = SceneGraph::new();
    let mut ctx = frame(0.1);
    let root = graph.root();

    let b = graph.insert(SceneNode::empty(Vec2::ZERO).with_behaviour(Recorder {
        name: "b",
        visits: visits.clone(),
        remove: None,
    }));
    let a = graph.insert(SceneNode::empty(Vec2::ZERO).with_behaviour(Recorder {
        name: "a",
        visits: visits.clone(),
        remove: Some(b),
    }));
    let c = graph.insert(SceneNode::empty(Vec2::ZERO).with_behaviour(Recorder {
        name: "c",
        visits: visits.clone(),
        remove: None,
    }));
    for id in [a, b, c] {
        graph.add_child_deferred(&mut ctx, root, id, Placement::Back);
    }
    // nothing is attached until the queue is drained
    assert!(graph.children(root).is_empty());
    for action in ctx.take_deferred() {
        graph.apply(action, &mut ctx).unwrap();
    }

    step(&mut graph, &mut ctx);
    assert_eq!(*visits.borrow(), vec!["a", "b", "c"]);

    visits.borrow_mut().clear();
    step(&mut graph, &mut ctx);
    assert_eq!(*visits.borrow(), vec!["a", "c"]);
    assert!(!graph.contains(b));
}

#[test]
fn actions_deferred_while_draining_wait_a_frame() {
    let mut graph = SceneGraph::new();
    let mut ctx = frame(0.1);
    let node = graph.insert(SceneNode::empty(Vec2::ZERO));
    let root = graph.root();
    ctx.defer_fn(move |graph, ctx| graph.add_child(ctx, root, node));

    for action in ctx.take_deferred() {
        graph.apply(action, &mut ctx).unwrap();
    }
    assert!(!graph.is_attached(node));
    assert_eq!(ctx.deferred().len(), 1);

    step(&mut graph, &mut ctx);
    assert!(graph.is_attached(node));
}

#[test]
fn linear_position_animation_reaches_target_on_time() {
    let mut graph = SceneGraph::new();
    let mut ctx = frame(0.25);
    let id = graph.insert(SceneNode::empty(Vec2::ZERO));
    graph.add_child(&mut ctx, graph.root(), id);
    for action in ctx.take_deferred() {
        graph.apply(action, &mut ctx).unwrap();
    }
    graph
        .get_mut(id)
        .unwrap()
        .object
        .animate_property(
            AnimatableProperty::Position,
            Vec2::new(100.0, 0.0),
            2.0,
            InterpolationMode::Linear,
        )
        .unwrap();

    for _ in 0..4 {
        step(&mut graph, &mut ctx);
    }
    let obj = &graph.get(id).unwrap().object;
    assert_relative_eq!(obj.position.x, 50.0, epsilon = 1e-3);
    assert!(obj.is_animating(AnimatableProperty::Position));

    for _ in 0..4 {
        step(&mut graph, &mut ctx);
    }
    let obj = &graph.get(id).unwrap().object;
    assert_relative_eq!(obj.position.x, 100.0, epsilon = 1e-3);
    assert!(!obj.is_animating(AnimatableProperty::Position));
    assert_eq!(obj.momentum, Vec2::ZERO);

    step(&mut graph, &mut ctx);
    assert_relative_eq!(
        graph.get(id).unwrap().object.position.x,
        100.0,
        epsilon = 1e-3
    );
}

#[test]
fn animate_back_returns_to_start() {
    let mut graph = SceneGraph::new();
    let mut ctx = frame(0.125);
    let id = graph.insert(SceneNode::empty(Vec2::ZERO));
    graph.add_child(&mut ctx, graph.root(), id);
    for action in ctx.take_deferred() {
        graph.apply(action, &mut ctx).unwrap();
    }
    graph
        .get_mut(id)
        .unwrap()
        .object
        .animate_property_and_back(
            AnimatableProperty::Scale,
            3.0f32,
            0.5,
            InterpolationMode::EaseBothSoft,
        )
        .unwrap();

    let mut peak: f32 = 0.0;
    for _ in 0..12 {
        step(&mut graph, &mut ctx);
        peak = peak.max(graph.get(id).unwrap().object.scale);
    }
    let obj = &graph.get(id).unwrap().object;
    assert_relative_eq!(peak, 3.0, epsilon = 1e-4);
    assert_relative_eq!(obj.scale, 1.0, epsilon = 1e-4);
    assert_eq!(obj.animator_count(), 0);
}

#[test]
fn bound_group_pushes_transparency_down() {
    let mut graph = SceneGraph::new();
    let mut ctx = frame(0.1);
    let mut group = SceneNode::group(Vec2::ZERO).with_bound_transparency();
    group.object.set_transparency(0.25);
    let group = graph.insert(group);
    let child = graph.insert(SceneNode::empty(Vec2::ZERO));
    graph.add_child(&mut ctx, graph.root(), group);
    graph.add_child(&mut ctx, group, child);
    step(&mut graph, &mut ctx);
    step(&mut graph, &mut ctx);
    assert_eq!(graph.get(child).unwrap().object.transparency(), 0.25);
}
