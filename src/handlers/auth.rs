use crate::{
    AppState,
    error::Result,
    models::{AuthPage, LoginRequest, SignupRequest, User},
};

pub fn login(state: &mut AppState, payload: LoginRequest) -> Result<User> {
    let user = state.users.authenticate(&payload)?;
    if state
        .session
        .current_user()
        .is_some_and(|current| current.id != user.id)
    {
        state.notifications.clear();
    }
    state.session.login(user.clone());
    Ok(user)
}

pub fn signup(state: &mut AppState, payload: SignupRequest) -> Result<User> {
    let user = state.users.register(&payload)?;
    state.notifications.clear();
    state.session.login(user.clone());
    Ok(user)
}

pub fn logout(state: &mut AppState) -> Option<User> {
    state.notifications.clear();
    state.session.logout()
}

pub fn auth_page(state: &AppState) -> AuthPage {
    AuthPage {
        signed_in_as: state.session.current_user().map(|u| u.username.clone()),
    }
}
