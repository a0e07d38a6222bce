use anyhow::Context;
use sprig_core::prelude::*;
use sprig_ui::*;

fn app() -> Vec<Node> {
    let mut nodes = vec![HeadingWrapper(
        Props::new(),
        vec![
            Heading(HeadingLevel::H1, Props::new(), vec!["Settings".into()]),
            Subtitle(Props::new(), vec!["Account and privacy".into()]),
        ],
    )];

    nodes.extend(Dialog(None, DialogProps::default(), || {
        let mut parts = vec![DialogTrigger(
            None,
            Props::new().class("trigger"),
            vec!["Delete account".into()],
        )];
        parts.extend(DialogPortal(None, DialogPortalProps::default(), || {
            vec![
                DialogOverlay(None, Props::new().class("backdrop"), None),
                DialogContent(
                    None,
                    Props::new().class("panel"),
                    None,
                    vec![
                        DialogTitle(None, Props::new(), vec!["Are you sure?".into()]),
                        DialogDescription(None, Props::new(), vec!["This cannot be undone.".into()]),
                        Button(
                            ButtonProps {
                                as_child: true,
                                ..Default::default()
                            },
                            vec![DialogClose(None, Props::new().class("cancel"), vec!["Cancel".into()])],
                        ),
                    ],
                ),
            ]
        }));
        parts
    }));
    nodes
}

fn show(host: &Host, step: &str) {
    log::info!("{step}");
    println!("== {step}");
    println!("root: {}", host.markup());
    println!("body: {}", host.container_markup(DEFAULT_PORTAL_CONTAINER));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut host = Host::new();

    host.render(app);
    show(&host, "initial");

    let trigger = host
        .find_by_attr("class", "trigger")
        .context("trigger was not rendered")?;
    host.click(&trigger);
    host.render(app);
    show(&host, "opened");

    // The panel's closed-state style runs an exit animation.
    let panel = host
        .find_by_attr("role", "dialog")
        .context("dialog content was not rendered")?;
    panel.set_animation_name("slideOut");

    let cancel = host
        .find_by_attr("class", "cancel")
        .context("close button was not rendered")?;
    host.click(&cancel);
    host.render(app);
    show(&host, "closing, waiting for slideOut");

    host.end_animation(&panel, "slideOut");
    host.render(app);
    show(&host, "closed");

    let fallback = ErrorBoundary(
        |info| vec![Node::text(format!("error: {}", info.message))],
        || vec![DialogTitle(None, Props::new(), vec!["orphan".into()])],
    );
    println!("== outside a dialog\n{}", markup_of(&fallback));
    Ok(())
}
