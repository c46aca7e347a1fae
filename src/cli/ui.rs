use userdeck::{User, UserStore};

const NAME_WIDTH: usize = 28;

pub fn banner(store: &UserStore) {
    println!("userdeck: type 'help' for commands, 'fetch' to load a page");
    status(store);
}

pub fn status(store: &UserStore) {
    let filters = store.filters();
    println!(
        "users: {}  next page: {}  loading: {}  hydrated: {}",
        store.user_count(),
        store.page(),
        store.is_loading(),
        store.is_hydrated()
    );
    println!(
        "filters: search='{}' gender={} favorites-only={}",
        filters.search_text,
        filters.gender.as_deref().unwrap_or("any"),
        filters.favorites_only
    );
    if let Some(user) = store.selected_user() {
        println!("selected: {} ({})", user.full_name(), user.id);
    }
    if let Some(error) = store.error() {
        println!("last error: {}", error);
    }
    println!("unsaved changes: {}", store.is_dirty());
}

pub fn user_table(users: &[User], total: usize) {
    for user in users {
        println!(
            "{} {:<width$} {:<7} {:>3}  {:<14} [{}]",
            if user.is_favorite { '*' } else { ' ' },
            truncate(&user.full_name(), NAME_WIDTH),
            user.gender,
            user.age,
            user.id,
            user.tags.join(", "),
            width = NAME_WIDTH,
        );
    }
    println!("{} of {} users", users.len(), total);
}

pub fn user_detail(user: &User) {
    println!("{} ({})", user.full_name(), user.id);
    println!("  email:    {}", user.email);
    println!("  phone:    {}", user.phone);
    println!("  gender:   {}  age: {}", user.gender, user.age);
    println!(
        "  location: {}, {} {}, {}",
        user.location.street, user.location.postcode, user.location.city, user.location.country
    );
    println!("  picture:  {}", user.picture);
    println!("  favorite: {}", user.is_favorite);
    println!("  tags:     [{}]", user.tags.join(", "));
}

pub fn tags(tags: &[String]) {
    if tags.is_empty() {
        println!("no tags");
    } else {
        println!("{}", tags.join(", "));
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
