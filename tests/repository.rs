use product_board::domain::comment::{CommentListQuery, NewComment};
use product_board::domain::product::{NewProduct, UpdateProduct};
use product_board::repository::{
    CommentReader, CommentWriter, DieselRepository, ProductReader, ProductWriter, RepositoryError,
    UserReader,
};

mod common;

#[test]
fn test_user_repository_crud() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let alice = common::create_test_user(&repo, "alice@example.com");

    let by_id = repo
        .get_user_by_id(alice.id)
        .unwrap()
        .expect("user should exist");
    assert_eq!(by_id.email, "alice@example.com");

    let by_email = repo
        .get_user_by_email("alice@example.com")
        .unwrap()
        .expect("user should exist");
    assert_eq!(by_email.id, alice.id);

    assert!(repo.get_user_by_email("nobody@example.com").unwrap().is_none());
}

#[test]
fn test_product_repository_crud() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let alice = common::create_test_user(&repo, "alice@example.com");

    let created = repo
        .create_product(&NewProduct::new(alice.id, "Widget", "A fine widget."))
        .unwrap();
    assert_eq!(created.author_id, alice.id);
    assert_eq!(created.author_email, "alice@example.com");
    assert_eq!(created.view_count, 0);

    let fetched = repo
        .get_product_by_id(created.id)
        .unwrap()
        .expect("product should exist");
    assert_eq!(fetched.title, "Widget");

    let listed = repo.list_products().unwrap();
    assert_eq!(listed.len(), 1);

    // Partial update leaves the untouched column alone.
    let updated = repo
        .update_product(created.id, &UpdateProduct::new().title("Gadget"))
        .unwrap();
    assert_eq!(updated.title, "Gadget");
    assert_eq!(updated.content, "A fine widget.");

    let err = repo
        .update_product(9999, &UpdateProduct::new().title("Ghost"))
        .expect_err("expected update of missing product to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    repo.delete_product(created.id).unwrap();
    assert!(repo.get_product_by_id(created.id).unwrap().is_none());

    let err = repo
        .delete_product(created.id)
        .expect_err("expected second delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_increment_view_count() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let alice = common::create_test_user(&repo, "alice@example.com");

    let product = repo
        .create_product(&NewProduct::new(alice.id, "Widget", "A fine widget."))
        .unwrap();

    repo.increment_view_count(product.id).unwrap();
    repo.increment_view_count(product.id).unwrap();

    let fetched = repo
        .get_product_by_id(product.id)
        .unwrap()
        .expect("product should exist");
    assert_eq!(fetched.view_count, 2);

    let err = repo
        .increment_view_count(9999)
        .expect_err("expected increment of missing product to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_comment_repository_crud() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let alice = common::create_test_user(&repo, "alice@example.com");
    let bob = common::create_test_user(&repo, "bob@example.com");

    let product = repo
        .create_product(&NewProduct::new(alice.id, "Widget", "A fine widget."))
        .unwrap();

    let first = repo
        .create_comment(&NewComment::new(product.id, bob.id, "Looks great."))
        .unwrap();
    assert_eq!(first.author_email, "bob@example.com");
    assert_eq!(first.like_count, 0);
    assert!(!first.is_liked);

    let second = repo
        .create_comment(&NewComment::new(product.id, alice.id, "Thanks!"))
        .unwrap();

    let listed = repo
        .list_comments(CommentListQuery::new(product.id))
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[1].id, second.id);

    assert!(
        repo.list_comments(CommentListQuery::new(9999))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_comment_lookup_is_scoped_to_product() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let alice = common::create_test_user(&repo, "alice@example.com");

    let first_product = repo
        .create_product(&NewProduct::new(alice.id, "Widget", "A fine widget."))
        .unwrap();
    let second_product = repo
        .create_product(&NewProduct::new(alice.id, "Gadget", "A fine gadget."))
        .unwrap();

    let comment = repo
        .create_comment(&NewComment::new(first_product.id, alice.id, "First."))
        .unwrap();

    assert!(
        repo.get_comment_by_id(comment.id, first_product.id, None)
            .unwrap()
            .is_some()
    );
    assert!(
        repo.get_comment_by_id(comment.id, second_product.id, None)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_toggle_comment_like_flips_membership() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let alice = common::create_test_user(&repo, "alice@example.com");
    let bob = common::create_test_user(&repo, "bob@example.com");

    let product = repo
        .create_product(&NewProduct::new(alice.id, "Widget", "A fine widget."))
        .unwrap();
    let comment = repo
        .create_comment(&NewComment::new(product.id, alice.id, "First."))
        .unwrap();

    let liked = repo.toggle_comment_like(comment.id, bob.id).unwrap();
    assert!(liked.liked);
    assert_eq!(liked.like_count, 1);

    // The flag is resolved per viewer.
    let seen_by_bob = repo
        .get_comment_by_id(comment.id, product.id, Some(bob.id))
        .unwrap()
        .expect("comment should exist");
    assert!(seen_by_bob.is_liked);
    let seen_by_alice = repo
        .get_comment_by_id(comment.id, product.id, Some(alice.id))
        .unwrap()
        .expect("comment should exist");
    assert!(!seen_by_alice.is_liked);

    let unliked = repo.toggle_comment_like(comment.id, bob.id).unwrap();
    assert!(!unliked.liked);
    assert_eq!(unliked.like_count, 0);

    let listed = repo
        .list_comments(CommentListQuery::new(product.id).viewer(bob.id))
        .unwrap();
    assert_eq!(listed[0].like_count, 0);
    assert!(!listed[0].is_liked);
}
