/// Port for looking up staff display names by user id.
pub trait ActorDirectory {
    /// Display name for `user_id`, or `None` if the directory has no entry.
    fn display_name(&self, user_id: &str) -> Option<String>;
}
