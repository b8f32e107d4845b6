use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Element, Font, Length, Theme};

use crate::app::{scaled, HoverTarget, Message};
use crate::forms::{AccountForm, PasswordField, SocialProvider};
use crate::theme::{muted_color, tertiary_color};
use crate::widgets::primary_button::primary_button;
use crate::widgets::secondary_button::secondary_button;

const FORM_WIDTH: f32 = 360.0;

/// Login/signup form. Only the local form state changes; nothing is sent.
pub fn view<'a>(
    fs: f32,
    form: &AccountForm,
    is_hovered: impl Fn(HoverTarget) -> bool,
    theme: &Theme,
) -> Element<'a, Message> {
    let muted = muted_color(theme);
    let tertiary = tertiary_color(theme);
    let heading = form.heading();

    let mut fields = column![
        text(heading)
            .size(scaled(26.0, fs))
            .font(Font {
                weight: iced::font::Weight::Bold,
                ..Font::DEFAULT
            }),
        Space::new().height(16),
        text_input("Email", &form.email)
            .on_input(Message::AccountEmailChanged)
            .size(scaled(14.0, fs))
            .padding([8, 10]),
        Space::new().height(10),
        password_row(
            fs,
            form.password_placeholder(),
            &form.password,
            form.show_password,
            PasswordField::Password,
            Message::AccountPasswordChanged,
        ),
    ]
    .width(Length::Fill);

    if form.signup {
        fields = fields.push(Space::new().height(10)).push(password_row(
            fs,
            "Confirm password",
            &form.confirm,
            form.show_confirm,
            PasswordField::Confirm,
            Message::AccountConfirmChanged,
        ));
    } else {
        fields = fields.push(Space::new().height(6)).push(
            container(text("Forgot password?").size(scaled(12.0, fs)).color(muted))
                .width(Length::Fill)
                .align_right(Length::Fill),
        );
    }

    let submit = primary_button(
        move || {
            container(text(heading).size(scaled(15.0, fs)))
                .center_x(Length::Fill)
                .into()
        },
        Some(Message::SubmitAccount),
        is_hovered(HoverTarget::SubmitAccount),
        |h| Message::Hover(HoverTarget::SubmitAccount, h),
        [10, 20],
        Length::Fill,
    );

    let (prompt, link) = form.switch_prompt();
    let switch = row![
        text(prompt).size(scaled(13.0, fs)).color(muted),
        button(text(link).size(scaled(13.0, fs)))
            .on_press(Message::ToggleSignup)
            .style(button::text)
            .padding(0),
    ]
    .align_y(iced::Alignment::Center);

    let divider = text("Or").size(scaled(12.0, fs)).color(tertiary);

    let socials = column(SocialProvider::ALL.iter().map(|&provider| {
        secondary_button(
            move || {
                container(text(provider.label()).size(scaled(14.0, fs)))
                    .center_x(Length::Fill)
                    .into()
            },
            Message::SocialLogin(provider),
            is_hovered(HoverTarget::Social(provider)),
            move |h| Message::Hover(HoverTarget::Social(provider), h),
            [9, 16],
            Length::Fill,
        )
    }))
    .spacing(10);

    let form_column = column![
        fields,
        Space::new().height(18),
        submit,
        Space::new().height(12),
        switch,
        Space::new().height(16),
        divider,
        Space::new().height(16),
        socials,
    ]
    .align_x(iced::Alignment::Center)
    .max_width(scaled(FORM_WIDTH, fs));

    container(form_column).center_x(Length::Fill).into()
}

fn password_row<'a>(
    fs: f32,
    placeholder: &str,
    value: &str,
    visible: bool,
    field: PasswordField,
    on_input: fn(String) -> Message,
) -> Element<'a, Message> {
    let toggle = if visible { "Hide" } else { "Show" };

    row![
        text_input(placeholder, value)
            .on_input(on_input)
            .secure(!visible)
            .size(scaled(14.0, fs))
            .padding([8, 10])
            .width(Length::Fill),
        button(text(toggle).size(scaled(12.0, fs)))
            .on_press(Message::TogglePasswordVisible(field))
            .style(button::text)
            .padding([6, 8]),
    ]
    .spacing(6)
    .align_y(iced::Alignment::Center)
    .into()
}
