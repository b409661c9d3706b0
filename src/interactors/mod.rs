//! Ready-made edit dialogues.
//!
//! Each interactor answers the prompts of one `--edit-key` or `--card-edit`
//! command. Run them through [`crate::dialogue::Dialogue`] or hand them to a
//! [`crate::context::Context`] after [`crate::dialogue::boxed`].
//!
//! | Interactor | Menu command |
//! |------------|--------------|
//! | [`AddUserIdInteractor`] | `adduid` |
//! | [`SetExpiryInteractor`] | `expire` |
//! | [`SetOwnerTrustInteractor`] | `trust` |
//! | [`RevokeKeyInteractor`] | `revkey` |
//! | [`AddExistingSubkeyInteractor`] | `addkey` |
//! | [`SignKeyInteractor`] | `sign` and variants |
//! | [`GenCardKeyInteractor`] | `admin` / `generate` |

mod add_existing_subkey;
mod add_user_id;
mod gen_card_key;
mod owner_trust;
mod revoke_key;
mod set_expiry;
mod sign_key;

pub use add_existing_subkey::*;
pub use add_user_id::*;
pub use gen_card_key::*;
pub use owner_trust::*;
pub use revoke_key::*;
pub use set_expiry::*;
pub use sign_key::*;
