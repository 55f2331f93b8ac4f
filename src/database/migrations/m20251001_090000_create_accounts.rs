use sea_orm_migration::{
    prelude::*,
    schema::{
        boolean, date_null, double_null, integer, pk_auto, small_integer_null, string,
        string_len_null, string_null, text_null, timestamp_with_time_zone,
        timestamp_with_time_zone_null, uuid,
    },
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(uuid(Account::Id).primary_key())
                    .col(string(Account::Email))
                    .col(string(Account::Phone))
                    .col(string(Account::FirstName))
                    .col(string(Account::LastName))
                    .col(string(Account::PasswordHash))
                    .col(boolean(Account::IsAdmitted).default(false))
                    .col(timestamp_with_time_zone_null(Account::AdmissionDate))
                    .col(boolean(Account::IsActive).default(true))
                    .col(boolean(Account::IsStaff).default(false))
                    .col(boolean(Account::IsSuperuser).default(false))
                    .col(timestamp_with_time_zone(Account::CreatedAt))
                    .col(timestamp_with_time_zone(Account::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-account-email")
                    .table(Account::Table)
                    .col(Account::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-account-phone")
                    .table(Account::Table)
                    .col(Account::Phone)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RegistrationSession::Table)
                    .if_not_exists()
                    .col(uuid(RegistrationSession::Id).primary_key())
                    .col(string(RegistrationSession::Email))
                    .col(string(RegistrationSession::Phone))
                    .col(string(RegistrationSession::FirstName))
                    .col(string(RegistrationSession::LastName))
                    .col(string(RegistrationSession::EmailOtp))
                    .col(string(RegistrationSession::PhoneOtp))
                    .col(timestamp_with_time_zone(RegistrationSession::OtpExpiresAt))
                    .col(boolean(RegistrationSession::IsEmailVerified).default(false))
                    .col(boolean(RegistrationSession::IsPhoneVerified).default(false))
                    .col(timestamp_with_time_zone(RegistrationSession::CreatedAt))
                    .col(timestamp_with_time_zone(RegistrationSession::ExpiresAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-registration_session-email-phone")
                    .table(RegistrationSession::Table)
                    .col(RegistrationSession::Email)
                    .col(RegistrationSession::Phone)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ApplicationSequence::Table)
                    .if_not_exists()
                    .col(integer(ApplicationSequence::Year).primary_key())
                    .col(integer(ApplicationSequence::LastValue).default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ApplicationProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(ApplicationProfile::Id))
                    .col(uuid(ApplicationProfile::AccountId))
                    .col(string(ApplicationProfile::ApplicationId))
                    .col(date_null(ApplicationProfile::DateOfBirth))
                    .col(string_len_null(ApplicationProfile::Gender, 8))
                    .col(string_null(ApplicationProfile::ProfilePicture))
                    .col(string_len_null(ApplicationProfile::AadhaarNumber, 12))
                    .col(string_null(ApplicationProfile::AadhaarCertificate))
                    .col(text_null(ApplicationProfile::CurrentAddress))
                    .col(text_null(ApplicationProfile::PermanentAddress))
                    .col(string_null(ApplicationProfile::FatherName))
                    .col(string_len_null(ApplicationProfile::FatherPhone, 10))
                    .col(string_null(ApplicationProfile::FatherOccupation))
                    .col(string_null(ApplicationProfile::MotherName))
                    .col(string_len_null(ApplicationProfile::MotherPhone, 10))
                    .col(string_null(ApplicationProfile::MotherOccupation))
                    .col(string_null(ApplicationProfile::GuardianName))
                    .col(string_len_null(ApplicationProfile::GuardianPhone, 10))
                    .col(string_null(ApplicationProfile::GuardianOccupation))
                    .col(string_null(ApplicationProfile::Caste))
                    .col(string_null(ApplicationProfile::CasteCertificate))
                    .col(boolean(ApplicationProfile::IsEws).default(false))
                    .col(string_null(ApplicationProfile::EwsCertificate))
                    .col(boolean(ApplicationProfile::IsDisabled).default(false))
                    .col(string_null(ApplicationProfile::DisabilityCertificate))
                    .col(timestamp_with_time_zone(ApplicationProfile::CreatedAt))
                    .col(timestamp_with_time_zone(ApplicationProfile::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-application_profile-account_id")
                            .from(ApplicationProfile::Table, ApplicationProfile::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            (
                "idx-application_profile-account_id",
                ApplicationProfile::AccountId,
            ),
            (
                "idx-application_profile-application_id",
                ApplicationProfile::ApplicationId,
            ),
            (
                "idx-application_profile-aadhaar_number",
                ApplicationProfile::AadhaarNumber,
            ),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(ApplicationProfile::Table)
                        .col(column)
                        .unique()
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(EducationProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(EducationProfile::Id))
                    .col(uuid(EducationProfile::AccountId))
                    .col(integer(EducationProfile::ApplicationProfileId))
                    .col(string_null(EducationProfile::SchoolName10th))
                    .col(string_null(EducationProfile::SchoolBoard10th))
                    .col(small_integer_null(EducationProfile::Subject1Marks10th))
                    .col(small_integer_null(EducationProfile::Subject2Marks10th))
                    .col(small_integer_null(EducationProfile::Subject3Marks10th))
                    .col(small_integer_null(EducationProfile::Subject4Marks10th))
                    .col(small_integer_null(EducationProfile::Subject5Marks10th))
                    .col(small_integer_null(EducationProfile::Subject6Marks10th))
                    .col(double_null(EducationProfile::Percentage10th))
                    .col(boolean(EducationProfile::IsAppearing).default(true))
                    .col(string_null(EducationProfile::SchoolName12th))
                    .col(string_null(EducationProfile::SchoolBoard12th))
                    .col(string_len_null(EducationProfile::SubjectStream, 16))
                    .col(small_integer_null(EducationProfile::Subject1Marks12th))
                    .col(small_integer_null(EducationProfile::Subject2Marks12th))
                    .col(small_integer_null(EducationProfile::Subject3Marks12th))
                    .col(small_integer_null(EducationProfile::Subject4Marks12th))
                    .col(small_integer_null(EducationProfile::Subject5Marks12th))
                    .col(small_integer_null(EducationProfile::Subject6Marks12th))
                    .col(double_null(EducationProfile::Percentage12th))
                    .col(timestamp_with_time_zone(EducationProfile::CreatedAt))
                    .col(timestamp_with_time_zone(EducationProfile::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-education_profile-account_id")
                            .from(EducationProfile::Table, EducationProfile::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-education_profile-application_profile_id")
                            .from(
                                EducationProfile::Table,
                                EducationProfile::ApplicationProfileId,
                            )
                            .to(ApplicationProfile::Table, ApplicationProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            (
                "idx-education_profile-account_id",
                EducationProfile::AccountId,
            ),
            (
                "idx-education_profile-application_profile_id",
                EducationProfile::ApplicationProfileId,
            ),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(EducationProfile::Table)
                        .col(column)
                        .unique()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EducationProfile::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ApplicationProfile::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ApplicationSequence::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(RegistrationSession::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
    Email,
    Phone,
    FirstName,
    LastName,
    PasswordHash,
    IsAdmitted,
    AdmissionDate,
    IsActive,
    IsStaff,
    IsSuperuser,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RegistrationSession {
    Table,
    Id,
    Email,
    Phone,
    FirstName,
    LastName,
    EmailOtp,
    PhoneOtp,
    OtpExpiresAt,
    IsEmailVerified,
    IsPhoneVerified,
    CreatedAt,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum ApplicationSequence {
    Table,
    Year,
    LastValue,
}

#[derive(DeriveIden)]
enum ApplicationProfile {
    Table,
    Id,
    AccountId,
    ApplicationId,
    DateOfBirth,
    Gender,
    ProfilePicture,
    AadhaarNumber,
    AadhaarCertificate,
    CurrentAddress,
    PermanentAddress,
    FatherName,
    FatherPhone,
    FatherOccupation,
    MotherName,
    MotherPhone,
    MotherOccupation,
    GuardianName,
    GuardianPhone,
    GuardianOccupation,
    Caste,
    CasteCertificate,
    IsEws,
    EwsCertificate,
    IsDisabled,
    DisabilityCertificate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EducationProfile {
    Table,
    Id,
    AccountId,
    ApplicationProfileId,
    #[sea_orm(iden = "school_name_10th")]
    SchoolName10th,
    #[sea_orm(iden = "school_board_10th")]
    SchoolBoard10th,
    #[sea_orm(iden = "subject1_marks_10th")]
    Subject1Marks10th,
    #[sea_orm(iden = "subject2_marks_10th")]
    Subject2Marks10th,
    #[sea_orm(iden = "subject3_marks_10th")]
    Subject3Marks10th,
    #[sea_orm(iden = "subject4_marks_10th")]
    Subject4Marks10th,
    #[sea_orm(iden = "subject5_marks_10th")]
    Subject5Marks10th,
    #[sea_orm(iden = "subject6_marks_10th")]
    Subject6Marks10th,
    #[sea_orm(iden = "percentage_10th")]
    Percentage10th,
    IsAppearing,
    #[sea_orm(iden = "school_name_12th")]
    SchoolName12th,
    #[sea_orm(iden = "school_board_12th")]
    SchoolBoard12th,
    SubjectStream,
    #[sea_orm(iden = "subject1_marks_12th")]
    Subject1Marks12th,
    #[sea_orm(iden = "subject2_marks_12th")]
    Subject2Marks12th,
    #[sea_orm(iden = "subject3_marks_12th")]
    Subject3Marks12th,
    #[sea_orm(iden = "subject4_marks_12th")]
    Subject4Marks12th,
    #[sea_orm(iden = "subject5_marks_12th")]
    Subject5Marks12th,
    #[sea_orm(iden = "subject6_marks_12th")]
    Subject6Marks12th,
    #[sea_orm(iden = "percentage_12th")]
    Percentage12th,
    CreatedAt,
    UpdatedAt,
}
