use socialgraph::{NetworkError, SocialNetwork, User, UserId};

const ALICE: UserId = UserId(1);
const BOB: UserId = UserId(2);

fn main() -> Result<(), NetworkError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut network = SocialNetwork::new();
    network.add_user(User::new(1, "Alice", "NYC"));
    network.add_user(User::new(2, "Bob", "LA"));

    network.add_friendship(ALICE, BOB);
    network.add_friendship(BOB, ALICE); // no-op
    network.add_friendship(ALICE, ALICE); // refused

    network.add_post(ALICE, "hello, world")?;
    network.like_post(ALICE, 0)?;
    network.add_like_from(BOB, ALICE)?;

    for row in network.user_table() {
        println!("{row}\n");
    }
    println!("friends of Alice: {:?}", network.friend_ids_of(ALICE));

    network.remove_user(BOB);
    assert!(network.friend_ids_of(ALICE).is_empty());

    // Unknown IDs come back as errors, not panics.
    if let Err(err) = network.likes_of(BOB) {
        println!("{err}");
    }
    Ok(())
}
