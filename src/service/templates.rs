use askama::Template;

#[derive(Template)]
#[template(path = "emails/owner_notification.html")]
pub struct OwnerNotificationTemplate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/acknowledgment.html")]
pub struct AcknowledgmentTemplate<'a> {
    pub name: &'a str,
    pub message: &'a str,
    pub owner_name: &'a str,
}
