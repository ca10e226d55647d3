//! Named locator table for github.com
//!
//! GitHub's DOM is an uncontrolled, versioned surface: field ids, button
//! labels, and CSS classes change without notice. Every selector the flows
//! depend on lives here so a site change touches exactly one place.

use crate::browser::Locator;

// Login / logout
pub const LOGIN_FIELD: Locator = Locator::id("login_field");
pub const PASSWORD_FIELD: Locator = Locator::id("password");
pub const FORM_COMMIT: Locator = Locator::name("commit");
pub const USER_MENU: Locator = Locator::css("button[aria-label='Open user navigation menu']");
pub const SIGN_OUT_LINK: Locator = Locator::link_text("Sign out");

// Profile
pub const VCARD_NAMES: Locator = Locator::css(".vcard-names");
pub const CONTRIBUTIONS_GRAPH: Locator = Locator::css(".js-yearly-contributions");
pub const BIO_FIELD: Locator = Locator::id("user_profile_bio");
pub const SAVE_PROFILE: Locator = Locator::css("button.Button--primary");
pub const SETTINGS_HEADING: Locator = Locator::id("public-profile-heading");

// Repositories
pub const REPO_LIST_LINKS: Locator = Locator::css("h3 a");
pub const REPO_NAME_INPUT: Locator = Locator::css("input[data-testid='repository-name-input']");
pub const REPO_DESCRIPTION: Locator = Locator::name("Description");
// Hashed utility class straight from GitHub's markup; there is no stable
// hook on the create button today.
pub const CREATE_REPO_SUBMIT: Locator = Locator::css("button.jLvIcQ");
pub const STAR_BUTTON: Locator = Locator::css("button[aria-label='star this repository']");
pub const STAR_TOGGLE: Locator = Locator::css("button.js-toggler-target");
pub const FORK_BUTTON: Locator =
    Locator::css("button.btn-with-count[aria-label*='Fork your own copy']");

// Search
pub const SEARCH_OPEN: Locator = Locator::css("button[data-target='qbsearch-input.inputButton']");
pub const SEARCH_INPUT: Locator = Locator::name("query-builder-test");
pub const SEARCH_RESULTS: Locator = Locator::css(".repo-list-item");

// Notifications / explore / pulls
pub const NOTIFICATION_ITEMS: Locator = Locator::css(".notifications-list-item");
pub const EXPLORE_HEADING: Locator = Locator::css("h1.color-fg-muted.mb-n2");
pub const PULLS_ICON: Locator = Locator::css(".octicon-git-pull-request");
