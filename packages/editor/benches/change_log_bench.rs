use criterion::{black_box, criterion_group, criterion_main, Criterion};
use element_editor::{Document, EditSession, HeadlessHost, KeyInput, Mode, PageNode};

fn page(items: usize) -> Document {
    let mut list = PageNode::element("ul").with_attr("id", "list");
    for i in 0..items {
        list = list.with_child(
            PageNode::element("li")
                .with_attr("id", format!("item-{}", i))
                .with_child(PageNode::text(format!("Item {}", i))),
        );
    }
    Document::from_page(&[list])
}

fn remove_and_undo(c: &mut Criterion) {
    let ids: Vec<String> = (0..100).map(|i| format!("item-{}", i)).collect();

    c.bench_function("remove_and_undo_100", |b| {
        b.iter(|| {
            let mut session = EditSession::new(HeadlessHost::new(page(100)));
            session.toggle_activation();
            session.select_mode(Mode::Remove);

            for id in &ids {
                let target = session.host().document().get_element_by_id(id).unwrap();
                session.handle_click(black_box(&target));
            }
            while session.undo().is_some() {}
            session
        })
    });
}

fn text_edit_cycle(c: &mut Criterion) {
    let enter = KeyInput::new("Enter", false);

    c.bench_function("text_edit_cycle", |b| {
        b.iter(|| {
            let mut session = EditSession::new(HeadlessHost::new(page(10)));
            session.toggle_activation();
            session.select_mode(Mode::Edit);

            let target = session.host().document().get_element_by_id("item-5").unwrap();
            for i in 0..20 {
                session.handle_click(&target);
                session.host_mut().type_text(target, &format!("edit {}", i)).unwrap();
                session.handle_keydown(&target, black_box(&enter));
            }
            while session.undo().is_some() {}
            session
        })
    });
}

criterion_group!(benches, remove_and_undo, text_edit_cycle);
criterion_main!(benches);
