#[cfg(test)]
mod tests {
    use crate::COMPOSER;
    use crate::context::*;
    use crate::element::*;
    use crate::event::*;
    use crate::handle::ElementHandle;
    use crate::presence::*;
    use crate::runtime::*;
    use crate::slot::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Wiring {
        open: bool,
    }

    #[test]
    fn test_sibling_scopes_are_isolated() {
        init_logging();
        let mut ns = create_scope_namespace("Widget");
        let wiring = ns.define_context::<Wiring>("Widget", None);
        let factory = ns.finish();

        let first = factory.create_scope(None);
        let second = factory.create_scope(None);

        wiring.provide(Some(&first), Wiring { open: true }, || {
            wiring.provide(Some(&second), Wiring { open: false }, || {
                assert_eq!(
                    wiring.read(Some(&first), "WidgetPart"),
                    Ok(Wiring { open: true })
                );
                assert_eq!(
                    wiring.read(Some(&second), "WidgetPart"),
                    Ok(Wiring { open: false })
                );
            });
            // The second instance has no provider of its own in here.
            let err = wiring.read(Some(&second), "WidgetPart").unwrap_err();
            assert_eq!(err.consumer, "WidgetPart");
            assert_eq!(err.root, "Widget");
        });
    }

    #[test]
    fn test_sibling_scope_sees_its_default_not_the_neighbour() {
        let mut ns = create_scope_namespace("Defaulted");
        let wiring = ns.define_context("Defaulted", Some(Wiring { open: false }));
        let factory = ns.finish();
        let first = factory.create_scope(None);
        let second = factory.create_scope(None);
        wiring.provide(Some(&first), Wiring { open: true }, || {
            assert_eq!(
                wiring.read(Some(&second), "Part"),
                Ok(Wiring { open: false })
            );
        });
    }

    #[test]
    fn test_composed_namespaces_resolve_like_their_members() {
        let mut ns1 = create_scope_namespace("Menu");
        let menu = ns1.define_context::<u8>("Menu", None);
        let menu_factory = ns1.finish();

        let mut ns2 = create_scope_namespace("Popper");
        let popper = ns2.define_context::<u8>("Popper", None);
        let popper_factory = ns2.finish();

        let composed = compose_scope_namespaces(&menu_factory, &[popper_factory.clone()]);
        assert_eq!(composed.name(), "Menu");
        assert_eq!(composed.member_names().collect::<Vec<_>>(), vec!["Menu", "Popper"]);

        let overrides = menu_factory
            .create_scope(None)
            .merged(&popper_factory.create_scope(None));
        let via_composed = composed.create_scope(Some(&overrides));
        let via_menu = menu_factory.create_scope(Some(&overrides));
        let via_popper = popper_factory.create_scope(Some(&overrides));

        assert_eq!(menu.resolve(Some(&via_composed)), menu.resolve(Some(&via_menu)));
        assert_eq!(
            popper.resolve(Some(&via_composed)),
            popper.resolve(Some(&via_popper))
        );

        menu.provide(Some(&via_menu), 4, || {
            assert_eq!(menu.read(Some(&via_composed), "Item"), Ok(4));
        });
    }

    #[test]
    fn test_composed_factory_without_overrides_creates_every_member() {
        let a = create_scope_namespace("A").finish();
        let b = create_scope_namespace("B").finish();
        let scope = compose_scope_namespaces(&a, &[b]).create_scope(None);
        assert_eq!(scope.namespaces().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_slot_merge_and_presence_share_an_element() {
        let machine = Rc::new(RefCell::new(PresenceMachine::new(true)));
        let m = machine.clone();
        let sink = crate::refs::NodeRef::new(move |h| m.borrow_mut().attach(h.cloned()));
        let m = machine.clone();
        let wrapper = Props::new()
            .node_ref(sink)
            .on("onAnimationEnd", move |ev| m.borrow_mut().handle_event(ev));

        let calls = Rc::new(RefCell::new(0));
        let c = calls.clone();
        let child: Node = Element::new("div")
            .props(Props::new().on("onAnimationEnd", move |_| *c.borrow_mut() += 1))
            .into();
        let el = merge_into_single_child(wrapper, vec![child]).unwrap().unwrap();

        let handle = ElementHandle::new("div");
        handle.set_animation_name("enter");
        el.get_props().get_node_ref().unwrap().attach(&handle);
        handle.set_animation_name("exit");
        machine.borrow_mut().set_present(false);
        assert_eq!(machine.borrow().state(), PresenceState::UnmountSuspended);

        let on_end = el.get_props().get_handler("onAnimationEnd").unwrap();
        on_end(&Event::animation(EventKind::AnimationEnd, handle.id(), "exit"));
        assert_eq!(machine.borrow().state(), PresenceState::Unmounted);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_remember_keeps_state_across_frames() {
        COMPOSER.with(|c| c.borrow_mut().reset());
        let frame = || (remember(|| 1u8), remember_state(|| String::from("a")));
        let (n, s) = compose(frame);
        s.borrow_mut().push('b');
        let (n2, s2) = compose(frame);
        assert!(Rc::ptr_eq(&n, &n2));
        assert_eq!(*s2.borrow(), "ab");
    }

    #[test]
    fn test_keyed_presence_survives_conditional_branch() {
        let frame = |with_banner: bool| {
            if with_banner {
                let _ = remember(|| "banner");
            }
            remember_with_key("dialog-presence", || {
                RefCell::new(PresenceMachine::new(false))
            })
        };

        let first = compose(|| frame(true));
        first.borrow_mut().set_present(true);
        // The banner's slot is gone, shifting every order-based slot.
        let second = compose(|| frame(false));

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(second.borrow().state(), PresenceState::Mounted);
    }

    #[test]
    fn test_markup_rendering() {
        let node: Node = Element::new("div")
            .props(
                Props::new()
                    .attr("hidden", true)
                    .attr("disabled", false)
                    .attr("tabindex", -1)
                    .attr("title", "a \"quoted\" <b>")
                    .style(Style::new().set("opacity", 0.5))
                    .on("onClick", |_| {}),
            )
            .child("x & y")
            .into();
        assert_eq!(
            node.to_markup(),
            r#"<div hidden style="opacity: 0.5" tabindex="-1" title="a &quot;quoted&quot; &lt;b&gt;">x &amp; y</div>"#
        );
    }
}
